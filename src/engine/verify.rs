// src/engine/verify.rs

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::analysis::{classify, JobAnalysis, JobStatus};
use crate::errors::{JobqueueError, Result};
use crate::job::Registry;
use crate::report::{render_job, Console};
use crate::types::Mode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobVerdict {
    pub name: String,
    pub analysis: JobAnalysis,
}

/// Classification of every registered job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub jobs: Vec<JobVerdict>,
    /// Outputs the run pass is expected to produce.
    pub generated: HashSet<String>,
}

impl VerifyReport {
    pub fn error_count(&self) -> usize {
        self.jobs
            .iter()
            .filter(|j| j.analysis.status == JobStatus::Error)
            .count()
    }

    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    pub fn status_of(&self, name: &str) -> Option<JobStatus> {
        self.jobs
            .iter()
            .find(|j| j.name == name)
            .map(|j| j.analysis.status)
    }

    /// `Err(JobsHaveErrors)` if any job failed classification.
    pub fn into_result(self) -> Result<Self> {
        match self.error_count() {
            0 => Ok(self),
            n => Err(JobqueueError::JobsHaveErrors(n)),
        }
    }
}

/// Dry-run classification of all jobs, in registration order.
///
/// Outputs of jobs classified `Run` are added to the "generated" set so that
/// later jobs see them as planned inputs (and as duplicates if they claim
/// them again). Every job is shown, errors included; the caller decides
/// whether to abort.
pub fn verify(registry: &mut Registry, console: &mut Console) -> VerifyReport {
    registry.set_mode(Mode::Analysing);

    let mut report = VerifyReport::default();

    for job in registry.jobs() {
        let analysis = classify(job, &report.generated);
        render_job(console, job.name(), &analysis);

        match analysis.status {
            JobStatus::Run => {
                report
                    .generated
                    .extend(job.output_paths().map(str::to_string));
                debug!(job = %job.name(), "job will run");
            }
            JobStatus::Done => debug!(job = %job.name(), "job already done"),
            JobStatus::Error => warn!(job = %job.name(), "job failed verification"),
        }

        report.jobs.push(JobVerdict {
            name: job.name().to_string(),
            analysis,
        });
    }

    console.blank();
    info!(
        jobs = report.jobs.len(),
        errors = report.error_count(),
        "verify pass complete"
    );
    report
}
