//! GSN CLI
//!
//! Command-line front end for the GOTEC Sales Navigator.
//!
//! # Commands
//!
//! - `list` - Search, filter and sort a list
//! - `sync` - Replace a list with the central system's snapshot
//! - `edit` - Change fields of one record
//! - `create-proposal` / `set-status` / `mailto` - Proposal workflow
//! - `export` - Write a list as CSV or proposals as an HTML report
//! - `roi` - Investment return calculator
//! - `tasks` / `recent` - Dashboard task board and newest proposals
//! - `ask` / `summarize` / `plan-route` - Generative assistant

mod commands;
mod data;
mod error;

use chrono::Local;
use clap::{Parser, Subcommand};
use commands::proposal::CreateArgs;
use commands::roi::RoiArgs;
use commands::tasks::TaskCommand;
use commands::{Entity, OutputFormat, QueryArgs};
use data::Session;
use error::CliResult;
use gsn_assistant::{AssistantConfig, GeminiClient, UreqClient};
use gsn_core::Severity;
use gsn_sync_engine::SyncConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// GOTEC Sales Navigator command-line tools.
#[derive(Parser)]
#[command(name = "gsn")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file holding the lists between invocations
    #[arg(global = true, short, long)]
    data: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, filter and sort a list
    List {
        /// Which list
        entity: Entity,

        #[command(flatten)]
        query: QueryArgs,

        /// Only proposals past their deadline and still open
        #[arg(long)]
        overdue: bool,

        /// Output format (text, json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Replace a list with the central system's snapshot
    Sync {
        /// Which list
        entity: Entity,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Change fields of one record
    Edit {
        /// Which list
        entity: Entity,

        /// Record identifier
        id: String,

        /// Assignments as field=value
        #[arg(required = true)]
        assignments: Vec<String>,
    },

    /// Create a draft proposal
    CreateProposal(CreateArgs),

    /// Move a proposal to another status
    SetStatus {
        /// Proposal identifier
        id: String,

        /// New status (Draft, Sent, Accepted, Rejected, Expired)
        status: String,
    },

    /// Write the visible records of a list to a file
    Export {
        /// Which list
        entity: Entity,

        #[command(flatten)]
        query: QueryArgs,

        /// Write CSV to this path
        #[arg(long, conflicts_with = "report")]
        csv: Option<PathBuf>,

        /// Write an HTML report to this path (proposals only)
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print the mailto: link presenting a proposal to its customer
    Mailto {
        /// Proposal identifier
        id: String,
    },

    /// Investment return calculator
    Roi {
        #[command(flatten)]
        input: RoiArgs,

        /// Output format (text, json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Manage the dashboard task board
    Tasks {
        #[command(subcommand)]
        command: TaskCommand,
    },

    /// Show the five newest proposals
    Recent {
        /// Only proposals with this status, or All
        #[arg(long)]
        status: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Ask the assistant a question
    Ask {
        /// The question
        #[arg(required = true)]
        prompt: Vec<String>,
    },

    /// Summarize a proposal for internal review
    Summarize {
        /// Proposal identifier
        id: String,
    },

    /// Plan a visit route from the current position
    PlanRoute {
        /// Latitude of the starting point
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude of the starting point
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// File with one address per line
        addresses: PathBuf,
    },
}

impl Commands {
    fn is_mutating(&self) -> bool {
        matches!(
            self,
            Commands::Sync { .. }
                | Commands::Edit { .. }
                | Commands::CreateProposal(_)
                | Commands::SetStatus { .. }
        ) || matches!(self, Commands::Tasks { command } if command.is_mutating())
    }
}

fn gemini() -> GeminiClient<UreqClient> {
    let config = AssistantConfig::from_env();
    let http = UreqClient::new(config.request_timeout);
    GeminiClient::new(config, http)
}

async fn run(command: Commands, session: &Session) -> CliResult<String> {
    match command {
        Commands::List {
            entity,
            query,
            overdue,
            format,
        } => commands::list::run(session, entity, &query, overdue, format),
        Commands::Sync { entity, yes } => commands::sync::run(session, entity, yes).await,
        Commands::Edit {
            entity,
            id,
            assignments,
        } => commands::edit::run(session, entity, &id, &assignments),
        Commands::CreateProposal(args) => commands::proposal::create(session, args),
        Commands::SetStatus { id, status } => commands::proposal::set_status(session, &id, &status),
        Commands::Export {
            entity,
            query,
            csv,
            report,
        } => match (csv, report) {
            (Some(path), _) => commands::export::csv(session, entity, &query, &path),
            (None, Some(path)) => commands::export::report(session, entity, &query, &path),
            (None, None) => Err(error::CliError::usage("pass --csv or --report")),
        },
        Commands::Mailto { id } => commands::proposal::mailto(session, &id),
        Commands::Roi { input, format } => commands::roi::run(&input, format),
        Commands::Tasks { command } => commands::tasks::run(session, command),
        Commands::Recent { status, format } => {
            commands::tasks::recent(session, status.as_deref(), format)
        }
        Commands::Ask { prompt } => commands::assistant::ask(gemini(), &prompt.join(" ")).await,
        Commands::Summarize { id } => commands::assistant::summarize(session, gemini(), &id).await,
        Commands::PlanRoute {
            lat,
            lon,
            addresses,
        } => commands::assistant::plan_route(gemini(), lat, lon, &addresses).await,
    }
}

fn print_notifications(session: &Session) {
    for toast in session.navigator.notifier().take_history() {
        let mark = match toast.severity {
            Severity::Success => "✓",
            Severity::Error => "✗",
            Severity::Info => "ℹ",
        };
        eprintln!("{mark} {}", toast.message);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let today = Local::now().date_naive();
    let session = Session::open(cli.data, today, SyncConfig::default())?;

    let mutating = cli.command.is_mutating();
    let result = run(cli.command, &session).await;
    print_notifications(&session);

    let output = result?;
    if mutating {
        session.persist()?;
    }
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
