// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `jobqueue`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jobqueue",
    version,
    about = "Check and run a queue of jobs declared by their input and output files.",
    long_about = None
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the job file (TOML).
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub jobs: PathBuf,

    /// Run the jobs after verification. Without this flag only the
    /// verification report is printed.
    #[arg(long)]
    pub run: bool,

    /// Run commands through a worker process in a separate console window.
    #[arg(long, requires = "run")]
    pub window: bool,

    /// Disable the progress animation.
    #[arg(long)]
    pub no_progress: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `JOBQUEUE_LOG` or `warn` is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve commands for a parent `jobqueue --window` process.
    #[command(name = "spawner-worker", hide = true)]
    SpawnerWorker,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::spawner::WORKER_SUBCOMMAND;

    #[test]
    fn cli_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn defaults_to_dry_run_on_jobs_toml() {
        let args = CliArgs::try_parse_from(["jobqueue"]).unwrap();
        assert_eq!(args.jobs, PathBuf::from("Jobs.toml"));
        assert!(!args.run);
        assert!(!args.window);
        assert!(args.command.is_none());
    }

    #[test]
    fn jobs_path_can_be_overridden() {
        let args = CliArgs::try_parse_from(["jobqueue", "--jobs", "ci/Jobs.toml"]).unwrap();
        assert_eq!(args.jobs, PathBuf::from("ci/Jobs.toml"));
    }

    #[test]
    fn window_requires_run() {
        assert!(CliArgs::try_parse_from(["jobqueue", "--window"]).is_err());
        let args = CliArgs::try_parse_from(["jobqueue", "--run", "--window"]).unwrap();
        assert!(args.window);
    }

    #[test]
    fn worker_subcommand_matches_spawner_constant() {
        let args = CliArgs::try_parse_from(["jobqueue", WORKER_SUBCOMMAND]).unwrap();
        assert!(matches!(args.command, Some(Command::SpawnerWorker)));
    }

    #[test]
    fn log_level_is_parsed() {
        let args = CliArgs::try_parse_from(["jobqueue", "--log-level", "debug"]).unwrap();
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    }
}
