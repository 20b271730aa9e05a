// src/engine/summary.rs

/// Whether a declared output exists after its job ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCheck {
    pub path: String,
    pub title: String,
    pub present: bool,
}

/// What happened to one job during the run pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// All outputs already existed.
    Skipped,
    /// Classified as an error; not invoked.
    PredictedFailure,
    Succeeded,
    /// A command exited non-zero.
    CommandFailed { exit_code: i32, argv: Vec<String> },
    /// Commands succeeded but some outputs are still missing.
    MissingOutputs { outputs: Vec<OutputCheck> },
    /// The body failed for another reason (e.g. a command could not start).
    Errored { message: String },
}

impl JobOutcome {
    /// Failed while executing (as opposed to not run at all).
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            JobOutcome::CommandFailed { .. }
                | JobOutcome::MissingOutputs { .. }
                | JobOutcome::Errored { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRun {
    pub index: usize,
    pub name: String,
    pub outcome: JobOutcome,
}

/// Per-job outcomes of a run pass, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub runs: Vec<JobRun>,
}

impl RunSummary {
    pub fn record(&mut self, index: usize, name: impl Into<String>, outcome: JobOutcome) {
        self.runs.push(JobRun {
            index,
            name: name.into(),
            outcome,
        });
    }

    pub fn total(&self) -> usize {
        self.runs.len()
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Skipped))
    }

    /// Jobs not run because they were predicted to fail.
    pub fn not_run(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::PredictedFailure))
    }

    pub fn failed(&self) -> usize {
        self.count(JobOutcome::is_failure)
    }

    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Succeeded))
    }

    pub fn is_success(&self) -> bool {
        self.not_run() + self.failed() == 0
    }

    pub fn outcome_of(&self, name: &str) -> Option<&JobOutcome> {
        self.runs.iter().find(|r| r.name == name).map(|r| &r.outcome)
    }

    fn count(&self, pred: impl Fn(&JobOutcome) -> bool) -> usize {
        self.runs.iter().filter(|r| pred(&r.outcome)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_partition_outcomes() {
        let mut s = RunSummary::default();
        s.record(0, "a", JobOutcome::Skipped);
        s.record(1, "b", JobOutcome::PredictedFailure);
        s.record(
            2,
            "c",
            JobOutcome::CommandFailed {
                exit_code: 2,
                argv: vec!["x".into()],
            },
        );
        s.record(3, "d", JobOutcome::Succeeded);
        s.record(4, "e", JobOutcome::MissingOutputs { outputs: vec![] });

        assert_eq!(s.total(), 5);
        assert_eq!(s.skipped(), 1);
        assert_eq!(s.not_run(), 1);
        assert_eq!(s.failed(), 2);
        assert_eq!(s.succeeded(), 1);
        assert!(!s.is_success());
        assert_eq!(s.outcome_of("d"), Some(&JobOutcome::Succeeded));
    }

    #[test]
    fn skipped_only_is_success() {
        let mut s = RunSummary::default();
        s.record(0, "a", JobOutcome::Skipped);
        assert!(s.is_success());
    }
}
