//! Dashboard: personal task board and the recent proposals panel.
//!
//! Tasks are ordered open first, then by due date (tasks without a date
//! last), then by priority. Completed tasks ignore their due date.

use crate::error::{CoreError, CoreResult};
use crate::query::{parse_date, StatusFilter};
use crate::record::{record_status, Proposal, ProposalStatus};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Number of proposals shown on the recent proposals panel.
pub const RECENT_PROPOSALS: usize = 5;

record_status! {
    /// Urgency of a task.
    pub enum TaskPriority {
        /// Do first.
        High,
        /// Default for new tasks.
        Medium,
        /// Whenever there is time.
        Low,
    }
}

impl TaskPriority {
    /// Sort rank; lower comes first.
    pub fn rank(self) -> u8 {
        match self {
            TaskPriority::High => 1,
            TaskPriority::Medium => 2,
            TaskPriority::Low => 3,
        }
    }

    /// Next priority in the High → Medium → Low → High cycle.
    pub fn cycled(self) -> Self {
        match self {
            TaskPriority::High => TaskPriority::Medium,
            TaskPriority::Medium => TaskPriority::Low,
            TaskPriority::Low => TaskPriority::High,
        }
    }
}

/// One entry of the task board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Board-unique identifier.
    pub id: u64,
    /// What to do.
    pub text: String,
    /// Done or not.
    pub completed: bool,
    /// Urgency.
    pub priority: TaskPriority,
    /// Optional due date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl Task {
    /// Parsed due date; unreadable dates count as none.
    pub fn due(&self) -> Option<NaiveDate> {
        self.due_date.as_deref().and_then(parse_date)
    }

    /// An open task whose due date lies before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due().is_some_and(|due| due < today)
    }
}

/// Completion filter of the task board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionFilter {
    /// Every task.
    #[default]
    All,
    /// Open tasks only.
    Incomplete,
    /// Done tasks only.
    Completed,
}

impl CompletionFilter {
    /// Returns true if a task with this completion passes.
    pub fn matches(self, completed: bool) -> bool {
        match self {
            CompletionFilter::All => true,
            CompletionFilter::Incomplete => !completed,
            CompletionFilter::Completed => completed,
        }
    }
}

impl FromStr for CompletionFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(CompletionFilter::All),
            "incomplete" => Ok(CompletionFilter::Incomplete),
            "completed" => Ok(CompletionFilter::Completed),
            _ => Err(CoreError::UnknownStatus {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CompletionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompletionFilter::All => "All",
            CompletionFilter::Incomplete => "Incomplete",
            CompletionFilter::Completed => "Completed",
        })
    }
}

/// Filters applied to the task board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskQuery {
    /// Priority filter.
    pub priority: StatusFilter<TaskPriority>,
    /// Completion filter.
    pub completion: CompletionFilter,
}

/// Board order: open before done; open tasks by due date, undated last;
/// then priority.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| {
            if a.completed {
                Ordering::Equal
            } else {
                match (a.due(), b.due()) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
        })
        .then_with(|| a.priority.rank().cmp(&b.priority.rank()))
}

/// The personal task board of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    /// Creates a board holding `tasks` in insertion order.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// The starter board, with due dates relative to `today`.
    pub fn seed(today: NaiveDate) -> Self {
        let day = |offset: i64| {
            Some((today + Duration::days(offset)).format("%Y-%m-%d").to_string())
        };
        let task = |id, text: &str, completed, priority, due_date| Task {
            id,
            text: text.to_string(),
            completed,
            priority,
            due_date,
        };
        Self::new(vec![
            task(1, "Follow up with Client X on WEIDA proposal", false, TaskPriority::High, day(3)),
            task(2, "Prepare ROI calculation for Client Y", false, TaskPriority::Medium, None),
            task(3, "Schedule a technical demo for Client Z", true, TaskPriority::Low, day(0)),
            task(4, "Review overdue proposal for Client A", false, TaskPriority::High, day(-2)),
        ])
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if the board is empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Appends an open, medium-priority task. Blank text is rejected.
    pub fn add(&mut self, text: &str, due_date: Option<NaiveDate>) -> CoreResult<&Task> {
        if text.trim().is_empty() {
            return Err(CoreError::InvalidValue {
                field: "text",
                value: text.to_string(),
            });
        }
        let id = self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
            priority: TaskPriority::Medium,
            due_date: due_date.map(|d| d.format("%Y-%m-%d").to_string()),
        });
        debug!(id, "Added task");
        let index = self.tasks.len() - 1;
        Ok(&self.tasks[index])
    }

    fn task_mut(&mut self, id: u64) -> CoreResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(CoreError::TaskNotFound { id })
    }

    /// Flips completion; returns the new state.
    pub fn toggle(&mut self, id: u64) -> CoreResult<bool> {
        let task = self.task_mut(id)?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    /// Moves the task to the next priority; returns it.
    pub fn cycle_priority(&mut self, id: u64) -> CoreResult<TaskPriority> {
        let task = self.task_mut(id)?;
        task.priority = task.priority.cycled();
        Ok(task.priority)
    }

    /// Deletes a task.
    pub fn remove(&mut self, id: u64) -> CoreResult<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(CoreError::TaskNotFound { id })?;
        debug!(id, "Removed task");
        Ok(self.tasks.remove(index))
    }

    /// Filtered tasks in board order.
    pub fn view(&self, query: &TaskQuery) -> Vec<&Task> {
        let mut visible: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| query.priority.matches(t.priority))
            .filter(|t| query.completion.matches(t.completed))
            .collect();
        visible.sort_by(|a, b| compare_tasks(a, b));
        visible
    }

    /// Open tasks past their due date, in board order.
    pub fn overdue(&self, today: NaiveDate) -> Vec<&Task> {
        self.view(&TaskQuery::default())
            .into_iter()
            .filter(|t| t.is_overdue(today))
            .collect()
    }
}

/// The newest proposals passing `filter`, at most [`RECENT_PROPOSALS`].
///
/// Proposals with an unreadable date come last.
pub fn recent_proposals<'a>(
    proposals: &'a [Proposal],
    filter: StatusFilter<ProposalStatus>,
) -> Vec<&'a Proposal> {
    let mut recent: Vec<&Proposal> = proposals
        .iter()
        .filter(|p| filter.matches(p.status))
        .collect();
    recent.sort_by(|a, b| match (parse_date(&a.date), parse_date(&b.date)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    recent.truncate(RECENT_PROPOSALS);
    recent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    fn ids(tasks: &[&Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn board_order_puts_open_dated_tasks_first() {
        let board = TaskBoard::seed(today());
        assert_eq!(ids(&board.view(&TaskQuery::default())), [4, 1, 2, 3]);
    }

    #[test]
    fn same_due_date_falls_back_to_priority() {
        let due = Some("2024-07-05".to_string());
        let mut board = TaskBoard::default();
        board.add("low", None).unwrap();
        board.add("medium", None).unwrap();
        board.tasks[0].priority = TaskPriority::Low;
        board.tasks[0].due_date = due.clone();
        board.tasks[1].due_date = due;
        assert_eq!(ids(&board.view(&TaskQuery::default())), [2, 1]);
    }

    #[test]
    fn completed_tasks_ignore_due_dates() {
        let mut board = TaskBoard::new(vec![
            Task {
                id: 1,
                text: "a".into(),
                completed: true,
                priority: TaskPriority::Low,
                due_date: Some("2024-01-01".into()),
            },
            Task {
                id: 2,
                text: "b".into(),
                completed: true,
                priority: TaskPriority::High,
                due_date: None,
            },
        ]);
        assert_eq!(ids(&board.view(&TaskQuery::default())), [2, 1]);
        board.toggle(1).unwrap();
        assert_eq!(ids(&board.view(&TaskQuery::default())), [1, 2]);
    }

    #[test]
    fn filters_combine() {
        let board = TaskBoard::seed(today());
        let query = TaskQuery {
            priority: "High".parse().unwrap(),
            completion: CompletionFilter::Incomplete,
        };
        assert_eq!(ids(&board.view(&query)), [4, 1]);

        let query = TaskQuery {
            priority: "all".parse().unwrap(),
            completion: "completed".parse().unwrap(),
        };
        assert_eq!(ids(&board.view(&query)), [3]);
        assert!("Someday".parse::<CompletionFilter>().is_err());
    }

    #[test]
    fn add_defaults_and_rejects_blank_text() {
        let mut board = TaskBoard::seed(today());
        let due = NaiveDate::from_ymd_opt(2024, 7, 10).unwrap();
        let task = board.add("Call Injetec", Some(due)).unwrap().clone();
        assert_eq!(task.id, 5);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(!task.completed);
        assert_eq!(task.due_date.as_deref(), Some("2024-07-10"));

        assert!(matches!(
            board.add("   ", None),
            Err(CoreError::InvalidValue { field: "text", .. })
        ));
        assert_eq!(board.len(), 5);
    }

    #[test]
    fn toggle_cycle_and_remove() {
        let mut board = TaskBoard::seed(today());
        assert!(board.toggle(2).unwrap());
        assert!(!board.toggle(2).unwrap());

        assert_eq!(board.cycle_priority(1).unwrap(), TaskPriority::Medium);
        assert_eq!(board.cycle_priority(1).unwrap(), TaskPriority::Low);
        assert_eq!(board.cycle_priority(1).unwrap(), TaskPriority::High);

        assert_eq!(board.remove(3).unwrap().id, 3);
        let err = board.remove(3).unwrap_err();
        assert!(err.is_not_found());
        assert!(board.toggle(99).is_err());
    }

    #[test]
    fn overdue_needs_open_task_with_past_date() {
        let board = TaskBoard::seed(today());
        assert_eq!(ids(&board.overdue(today())), [4]);

        let done = Task {
            completed: true,
            ..board.tasks()[3].clone()
        };
        assert!(!done.is_overdue(today()));
        let undated = &board.tasks()[1];
        assert!(!undated.is_overdue(today()));
    }

    #[test]
    fn recent_proposals_are_newest_first() {
        let proposals = catalog::proposals(today());
        let recent = recent_proposals(&proposals, StatusFilter::All);
        assert!(recent.len() <= RECENT_PROPOSALS);
        let dates: Vec<_> = recent.iter().map(|p| parse_date(&p.date)).collect();
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));

        let sent = recent_proposals(&proposals, StatusFilter::Only(ProposalStatus::Sent));
        assert!(!sent.is_empty());
        assert!(sent.iter().all(|p| p.status == ProposalStatus::Sent));
    }

    #[test]
    fn recent_proposals_cap_and_unreadable_dates() {
        let mut proposals = catalog::proposals(today());
        let mut extra = proposals[0].clone();
        extra.id = "PROP-2024-099".into();
        extra.date = "sem data".into();
        proposals.push(extra);
        let mut newer = proposals[0].clone();
        newer.id = "PROP-2024-100".into();
        newer.date = "2030-01-01".into();
        proposals.push(newer);

        let recent = recent_proposals(&proposals, StatusFilter::All);
        assert_eq!(recent.len(), RECENT_PROPOSALS);
        assert_eq!(recent[0].id, "PROP-2024-100");
        assert!(recent.iter().all(|p| p.id != "PROP-2024-099"));
    }

    #[test]
    fn board_serializes_as_a_list() {
        let board = TaskBoard::seed(today());
        let json = serde_json::to_value(&board).unwrap();
        assert!(json.is_array());
        assert_eq!(json[1]["priority"], "Medium");
        assert!(json[1].get("dueDate").is_none());
        let back: TaskBoard = serde_json::from_value(json).unwrap();
        assert_eq!(back, board);
    }
}
