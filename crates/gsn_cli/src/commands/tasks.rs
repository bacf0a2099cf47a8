//! Dashboard commands: the task board and recent proposals.

use super::OutputFormat;
use crate::data::Session;
use crate::error::{CliError, CliResult};
use clap::Subcommand;
use gsn_core::{
    parse_date, recent_proposals, CompletionFilter, ProposalStatus, StatusFilter, Task,
    TaskPriority, TaskQuery,
};

/// Task board operations.
#[derive(Debug, Clone, Subcommand)]
pub enum TaskCommand {
    /// Show the board, open tasks first
    List {
        /// Only this priority (High, Medium, Low) or All
        #[arg(long)]
        priority: Option<String>,

        /// All, Incomplete or Completed
        #[arg(long)]
        status: Option<String>,

        /// Only open tasks past their due date
        #[arg(long)]
        overdue: bool,

        /// Output format (text, json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add an open, medium-priority task
    Add {
        /// What to do
        #[arg(required = true)]
        text: Vec<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Mark a task done, or open again
    Toggle {
        /// Task identifier
        id: u64,
    },

    /// Delete a task
    Delete {
        /// Task identifier
        id: u64,
    },

    /// Cycle the priority High, Medium, Low
    Priority {
        /// Task identifier
        id: u64,
    },
}

impl TaskCommand {
    /// Returns true if the command changes the board.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, TaskCommand::List { .. })
    }
}

/// Runs a task board command.
pub fn run(session: &Session, command: TaskCommand) -> CliResult<String> {
    let mut board = session.tasks.lock();
    match command {
        TaskCommand::List {
            priority,
            status,
            overdue,
            format,
        } => {
            let query = TaskQuery {
                priority: match priority {
                    Some(p) => p.parse::<StatusFilter<TaskPriority>>()?,
                    None => StatusFilter::All,
                },
                completion: match status {
                    Some(s) => s.parse::<CompletionFilter>()?,
                    None => CompletionFilter::All,
                },
            };
            let visible: Vec<&Task> = board
                .view(&query)
                .into_iter()
                .filter(|t| !overdue || t.is_overdue(session.today))
                .collect();
            render(&visible, board.len(), session, format)
        }
        TaskCommand::Add { text, due } => {
            let due = match due {
                Some(value) => Some(
                    parse_date(&value)
                        .ok_or_else(|| CliError::usage(format!("invalid due date: {value}")))?,
                ),
                None => None,
            };
            let task = board.add(&text.join(" "), due)?;
            Ok(format!("Added task {}: {}", task.id, task.text))
        }
        TaskCommand::Toggle { id } => Ok(if board.toggle(id)? {
            format!("Task {id} completed")
        } else {
            format!("Task {id} reopened")
        }),
        TaskCommand::Delete { id } => {
            let task = board.remove(id)?;
            Ok(format!("Deleted task {}: {}", task.id, task.text))
        }
        TaskCommand::Priority { id } => {
            let priority = board.cycle_priority(id)?;
            Ok(format!("Task {id} is now {priority} priority"))
        }
    }
}

fn render(
    tasks: &[&Task],
    total: usize,
    session: &Session,
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(tasks)?),
        OutputFormat::Text => {
            let mut lines = Vec::with_capacity(tasks.len() + 2);
            lines.push("ID\tDone\tPriority\tDue\tTask".to_string());
            for task in tasks {
                let mut due = task.due_date.clone().unwrap_or_else(|| "-".to_string());
                if task.is_overdue(session.today) {
                    due.push_str(" (overdue)");
                }
                lines.push(format!(
                    "{}\t{}\t{}\t{}\t{}",
                    task.id,
                    if task.completed { "x" } else { " " },
                    task.priority,
                    due,
                    task.text
                ));
            }
            lines.push(format!("{} of {} tasks", tasks.len(), total));
            Ok(lines.join("\n"))
        }
    }
}

/// Lists the newest proposals, optionally of one status.
pub fn recent(session: &Session, status: Option<&str>, format: OutputFormat) -> CliResult<String> {
    let filter = match status {
        Some(s) => s.parse::<StatusFilter<ProposalStatus>>()?,
        None => StatusFilter::All,
    };
    let proposals = session.navigator.proposals.records();
    let recent: Vec<_> = recent_proposals(&proposals, filter)
        .into_iter()
        .cloned()
        .collect();
    super::list::render(&recent, proposals.len(), format)
}
