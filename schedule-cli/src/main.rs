mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use schedule_core::{CorruptDataPolicy, EventUpdate, ScheduleConfig, ScheduleStore};
use tracing_subscriber::EnvFilter;

const FORMATS: &str = "\
Date format: YYYY-MM-DD (e.g., 2026-01-15)
Time format: HH:MM (e.g., 14:30)";

#[derive(Parser, Debug)]
#[command(name = "schedule")]
#[command(about = "Manage a schedule of events stored in a JSON file")]
#[command(after_help = FORMATS)]
struct Cli {
    /// Use this data file instead of the configured one
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Add a new event
    Add {
        title: String,

        /// Event date (YYYY-MM-DD)
        date: String,

        /// Event time (HH:MM)
        time: String,

        /// Optional description; remaining words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },
    /// List events, sorted by date and time unless filtered to one date
    List {
        /// Only show events on this date (YYYY-MM-DD)
        date: Option<String>,
    },
    /// Show details of a specific event
    Show { id: u64 },
    /// Update an existing event
    Update {
        id: u64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        time: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        description: Option<String>,
    },
    /// Delete an event
    Delete { id: u64 },
    /// Show config paths, or save new settings
    Config {
        /// Data file to use by default
        #[arg(long)]
        data_file: Option<PathBuf>,

        /// What to do with a data file that cannot be read
        #[arg(long, value_enum)]
        on_corrupt: Option<OnCorrupt>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum OnCorrupt {
    /// Start empty; the file is overwritten by the next save
    Discard,
    /// Rename the file to <file>.corrupt, then start empty
    Backup,
}

impl From<OnCorrupt> for CorruptDataPolicy {
    fn from(value: OnCorrupt) -> Self {
        match value {
            OnCorrupt::Discard => CorruptDataPolicy::Discard,
            OnCorrupt::Backup => CorruptDataPolicy::Backup,
        }
    }
}

fn main() -> ExitCode {
    // Usage errors exit with 1; `help` and `--help` exit with 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr, filtered by `SCHEDULE_LOG` (default: errors only).
fn init_logging() {
    let filter =
        EnvFilter::try_from_env("SCHEDULE_LOG").unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // No store needed
    if let Commands::Config {
        data_file,
        on_corrupt,
    } = &cli.command
    {
        return commands::config::run(data_file.clone(), on_corrupt.map(Into::into));
    }

    let config = ScheduleConfig::load().context("Failed to load configuration")?;
    let path = cli.file.unwrap_or_else(|| config.data_path());

    let report = ScheduleStore::open_with_policy(&path, config.on_corrupt)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    if let Some(warning) = &report.warning {
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }

    let mut store = report.store;
    dispatch(&mut store, cli.command)
}

fn dispatch(store: &mut ScheduleStore, command: Commands) -> Result<()> {
    match command {
        Commands::Add {
            title,
            date,
            time,
            description,
        } => commands::add::run(store, title, date, time, description.join(" ")),
        Commands::List { date } => commands::list::run(store, date.as_deref()),
        Commands::Show { id } => commands::show::run(store, id),
        Commands::Update {
            id,
            title,
            date,
            time,
            description,
        } => commands::update::run(
            store,
            id,
            EventUpdate {
                title,
                date,
                time,
                description,
            },
        ),
        Commands::Delete { id } => commands::delete::run(store, id),
        Commands::Config {
            data_file,
            on_corrupt,
        } => commands::config::run(data_file, on_corrupt.map(Into::into)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("schedule").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_joins_description_words() {
        let cli = parse(&["add", "Team Meeting", "2026-01-15", "14:00", "Discuss", "Q1", "-", "Q2"])
            .unwrap();
        assert_eq!(
            cli.command,
            Commands::Add {
                title: "Team Meeting".to_string(),
                date: "2026-01-15".to_string(),
                time: "14:00".to_string(),
                description: vec!["Discuss", "Q1", "-", "Q2"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            }
        );
    }

    #[test]
    fn test_parse_add_without_description() {
        let cli = parse(&["add", "Lunch", "2026-01-15", "12:00"]).unwrap();
        match cli.command {
            Commands::Add { description, .. } => assert!(description.is_empty()),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_add_missing_arguments_is_usage_error() {
        let err = parse(&["add", "Lunch", "2026-01-15"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(err.use_stderr());
    }

    #[test]
    fn test_parse_list_with_and_without_date() {
        assert_eq!(parse(&["list"]).unwrap().command, Commands::List { date: None });
        assert_eq!(
            parse(&["list", "2026-01-15"]).unwrap().command,
            Commands::List {
                date: Some("2026-01-15".to_string())
            }
        );
    }

    #[test]
    fn test_parse_non_numeric_id_is_usage_error() {
        for command in ["show", "delete", "update"] {
            let err = parse(&[command, "abc"]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "{command}");
            assert!(err.use_stderr());
        }
    }

    #[test]
    fn test_parse_update_only_supplied_fields() {
        let cli = parse(&["update", "1", "--time", "15:00", "--description", "moved"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Update {
                id: 1,
                title: None,
                date: None,
                time: Some("15:00".to_string()),
                description: Some("moved".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_unknown_command_is_usage_error() {
        let err = parse(&["frobnicate"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
        assert!(err.use_stderr());
    }

    #[test]
    fn test_parse_no_command_is_usage_error() {
        let err = parse(&[]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_help_exits_successfully() {
        let err = parse(&["help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(!err.use_stderr());
    }

    #[test]
    fn test_parse_config_settings() {
        assert_eq!(
            parse(&["config"]).unwrap().command,
            Commands::Config {
                data_file: None,
                on_corrupt: None,
            }
        );
        assert_eq!(
            parse(&["config", "--data-file", "events.json", "--on-corrupt", "backup"])
                .unwrap()
                .command,
            Commands::Config {
                data_file: Some(PathBuf::from("events.json")),
                on_corrupt: Some(OnCorrupt::Backup),
            }
        );
        assert!(parse(&["config", "--on-corrupt", "ignore"]).unwrap_err().use_stderr());
        assert_eq!(
            CorruptDataPolicy::from(OnCorrupt::Backup),
            CorruptDataPolicy::Backup
        );
    }

    #[test]
    fn test_parse_global_file_flag() {
        let cli = parse(&["list", "--file", "/tmp/events.json"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/events.json")));
    }

    #[test]
    fn test_dispatch_runs_against_given_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ScheduleStore::open(dir.path().join("schedule.json"))
            .unwrap()
            .store;

        let add = parse(&["add", "Lunch", "2026-01-15", "12:00", "with", "client"]).unwrap();
        dispatch(&mut store, add.command).unwrap();
        assert_eq!(store.get(1).unwrap().description, "with client");

        let update = parse(&["update", "1", "--title", "Brunch"]).unwrap();
        dispatch(&mut store, update.command).unwrap();
        assert_eq!(store.get(1).unwrap().title, "Brunch");

        let show_missing = parse(&["show", "9"]).unwrap();
        assert!(dispatch(&mut store, show_missing.command).is_err());

        let delete = parse(&["delete", "1"]).unwrap();
        dispatch(&mut store, delete.command).unwrap();
        assert!(store.is_empty());
    }
}
