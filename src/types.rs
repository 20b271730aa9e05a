use serde::{Deserialize, Serialize};

/// Where a child process reads its standard input from.
///
/// - `Null`: the null device (default). Jobs run unattended, so a command
///   waiting on stdin would otherwise hang the whole run.
/// - `Inherit`: share the host's stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StdinMode {
    #[default]
    Null,
    Inherit,
}

/// Lifecycle step of the job registry.
///
/// Declarations only mutate the job being registered while in `Scheduling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Scheduling,
    Analysing,
    Running,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Mode::Scheduling => "scheduling",
            Mode::Analysing => "analysing",
            Mode::Running => "running",
        };
        f.write_str(s)
    }
}
