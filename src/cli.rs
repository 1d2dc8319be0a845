//! Command-line argument parsing for boltbench.

use crate::runner::DEFAULT_ITERATIONS;
use crate::runtime::Runtime;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Runtime selection on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RuntimeArg {
    /// Probe the local endpoint, then fall back to cloud credentials.
    #[default]
    Auto,
    Cloud,
    Core,
}

impl RuntimeArg {
    /// Returns the explicit runtime, or `None` for auto-detection.
    pub fn requested(self) -> Option<Runtime> {
        match self {
            Self::Auto => None,
            Self::Cloud => Some(Runtime::Cloud),
            Self::Core => Some(Runtime::Core),
        }
    }
}

/// Run SQL and aggregating-index benchmarks on Firebolt Cloud or Firebolt Core.
#[derive(Parser, Debug)]
#[command(name = "boltbench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Runtime to use
    #[arg(long, value_enum, default_value_t = RuntimeArg::Auto, global = true)]
    pub runtime: RuntimeArg,

    /// Config file path
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Execute a SQL file
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Execute a SQL query given on the command line
    Query {
        #[arg(value_name = "SQL", required = true, num_args = 1..)]
        sql: Vec<String>,
    },
    /// Show the resolved runtime and test the connection
    Status,
    /// Execute a SQL file statement by statement, timing each one
    Timed {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Benchmark aggregating indexes for an industry vertical
    Bench {
        /// gaming, adtech, ecommerce, financial or observability
        #[arg(value_name = "VERTICAL")]
        vertical: String,

        /// Benchmark a single named query
        #[arg(long, value_name = "NAME")]
        query: Option<String>,

        /// Timed runs per query
        #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,

        /// Leave the aggregating indexes in place after a full run
        #[arg(long)]
        keep_indexes: bool,
    },
    /// Create the target database if it does not exist
    CreateDb {
        #[arg(value_name = "NAME")]
        name: Option<String>,
    },
}

impl Cli {
    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_args(args: &[&str]) -> Cli {
        Cli::parse_from(args)
    }

    #[test]
    fn test_parse_run() {
        let cli = parse_args(&["boltbench", "run", "queries.sql"]);
        assert_eq!(
            cli.command,
            Command::Run {
                file: PathBuf::from("queries.sql")
            }
        );
        assert_eq!(cli.runtime, RuntimeArg::Auto);
        assert_eq!(cli.runtime.requested(), None);
    }

    #[test]
    fn test_parse_query_words() {
        let cli = parse_args(&["boltbench", "query", "SELECT", "1", "as", "x"]);
        let Command::Query { sql } = cli.command else {
            panic!("expected query command");
        };
        assert_eq!(sql.join(" "), "SELECT 1 as x");
    }

    #[test]
    fn test_query_requires_sql() {
        assert!(Cli::try_parse_from(["boltbench", "query"]).is_err());
    }

    #[test]
    fn test_runtime_flag_after_subcommand() {
        let cli = parse_args(&["boltbench", "status", "--runtime", "cloud"]);
        assert_eq!(cli.command, Command::Status);
        assert_eq!(cli.runtime.requested(), Some(Runtime::Cloud));

        let cli = parse_args(&["boltbench", "--runtime", "core", "status"]);
        assert_eq!(cli.runtime.requested(), Some(Runtime::Core));
    }

    #[test]
    fn test_invalid_runtime_rejected() {
        assert!(Cli::try_parse_from(["boltbench", "--runtime", "edge", "status"]).is_err());
    }

    #[test]
    fn test_missing_subcommand_rejected() {
        assert!(Cli::try_parse_from(["boltbench"]).is_err());
        assert!(Cli::try_parse_from(["boltbench", "launch"]).is_err());
    }

    #[test]
    fn test_parse_bench() {
        let cli = parse_args(&["boltbench", "bench", "gaming"]);
        assert_eq!(
            cli.command,
            Command::Bench {
                vertical: "gaming".to_string(),
                query: None,
                iterations: DEFAULT_ITERATIONS,
                keep_indexes: false,
            }
        );

        let cli = parse_args(&[
            "boltbench",
            "bench",
            "gaming",
            "--query",
            "Player Profile",
            "-n",
            "5",
            "--keep-indexes",
        ]);
        assert_eq!(
            cli.command,
            Command::Bench {
                vertical: "gaming".to_string(),
                query: Some("Player Profile".to_string()),
                iterations: 5,
                keep_indexes: true,
            }
        );
    }

    #[test]
    fn test_parse_create_db() {
        let cli = parse_args(&["boltbench", "create-db"]);
        assert_eq!(cli.command, Command::CreateDb { name: None });

        let cli = parse_args(&["boltbench", "create-db", "gaming_demo"]);
        assert_eq!(
            cli.command,
            Command::CreateDb {
                name: Some("gaming_demo".to_string())
            }
        );
    }

    #[test]
    fn test_parse_config_path() {
        let cli = parse_args(&["boltbench", "--config", "/path/to/config.toml", "status"]);
        assert_eq!(cli.config_path(), PathBuf::from("/path/to/config.toml"));
    }
}
