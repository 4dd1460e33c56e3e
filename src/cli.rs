use adventure_log::{Day, Title, catalog::DEFAULT_ICON, store::DEFAULT_STORE_FILE};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    /// Adventure log file
    #[arg(long, short = 's', global = true, env = "ADVENTURE_LOG_STORE", default_value = DEFAULT_STORE_FILE)]
    pub store: PathBuf,

    /// Read an unparseable log as empty instead of failing
    #[arg(long, global = true, env = "ADVENTURE_LOG_RECOVER_CORRUPT")]
    pub recover_corrupt: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone)]
pub enum Command {
    /// Log a new adventure
    Add {
        /// What did you do?
        title: Title,

        /// Icon for the adventure
        #[arg(long, short = 'i', default_value = DEFAULT_ICON)]
        icon: String,
    },
    /// Remove an adventure
    Remove {
        /// Id of the adventure to remove
        id: String,
    },
    /// List every adventure in the order it was logged
    List,
    /// Show adventures grouped by day, newest first
    History,
    /// Show the adventures of a single day
    Day {
        /// Day to show, as YYYY-MM-DD
        day: Day,
    },
    /// Show statistics
    Stats {
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the icons to choose from
    Icons,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["adventure-log", "add", "  Morning walk  "])?;

        assert_eq!(cli.store, PathBuf::from(DEFAULT_STORE_FILE));
        assert!(!cli.recover_corrupt);
        match cli.command {
            Command::Add { title, icon } => {
                assert_eq!(title.as_str(), "Morning walk");
                assert_eq!(icon, DEFAULT_ICON);
            }
            _ => panic!("expected add"),
        }
        Ok(())
    }

    #[test]
    fn test_add_rejects_blank_title() {
        assert!(Cli::try_parse_from(["adventure-log", "add", "   "]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from([
            "adventure-log",
            "stats",
            "--json",
            "--store",
            "/tmp/log.json",
            "--recover-corrupt",
        ])?;

        assert_eq!(cli.store, PathBuf::from("/tmp/log.json"));
        assert!(cli.recover_corrupt);
        assert!(matches!(cli.command, Command::Stats { json: true }));
        Ok(())
    }

    #[test]
    fn test_day_argument_is_parsed() {
        assert!(Cli::try_parse_from(["adventure-log", "day", "2024-06-10"]).is_ok());
        assert!(Cli::try_parse_from(["adventure-log", "day", "June 10"]).is_err());
    }
}
