// src/config/settings.rs

use crate::cli::CliArgs;
use crate::config::model::ConfigSection;
use crate::exec::ExecOptions;

/// Effective run settings: `[config]` values with CLI overrides applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Execute jobs after the verify pass.
    pub run: bool,
    /// Route commands through a spawner worker in its own console.
    pub window: bool,
    pub exec: ExecOptions,
}

impl Settings {
    pub fn from_parts(args: &CliArgs, config: &ConfigSection) -> Self {
        let mut exec = config.exec_options();
        if args.no_progress {
            exec.progress.enabled = false;
        }
        Self {
            run: args.run,
            window: args.window,
            exec,
        }
    }
}
