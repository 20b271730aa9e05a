// src/engine/run.rs

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use super::summary::{JobOutcome, OutputCheck, RunSummary};
use crate::analysis::{classify, JobStatus};
use crate::exec::ExecContext;
use crate::fs::FileSystem;
use crate::job::{JobError, JobRecord, JobScope, Registry};
use crate::report::{render_outcome, render_running, render_skipped, render_summary};
use crate::types::Mode;

/// Execute every job that still has work to do, in registration order.
///
/// Each job is reclassified on its own, against an empty "generated" set:
/// inputs made by earlier jobs of this pass count only if they now exist.
/// Failures are recorded and the pass moves on to the next job.
pub fn run(registry: &mut Registry, ctx: &mut ExecContext) -> RunSummary {
    registry.set_mode(Mode::Running);

    let fs = Arc::clone(registry.filesystem());
    let nothing_generated = HashSet::new();
    let mut summary = RunSummary::default();

    for (index, job) in registry.jobs().iter().enumerate() {
        let analysis = classify(job, &nothing_generated);

        let outcome = match analysis.status {
            JobStatus::Done => {
                render_skipped(ctx.console(), index, job.name());
                info!(job = %job.name(), index, "skipping job; outputs exist");
                summary.record(index, job.name(), JobOutcome::Skipped);
                continue;
            }
            JobStatus::Error => {
                render_running(ctx.console(), index, job.name());
                warn!(job = %job.name(), index, "job predicted to fail; not running");
                JobOutcome::PredictedFailure
            }
            JobStatus::Run => {
                render_running(ctx.console(), index, job.name());
                info!(job = %job.name(), index, "running job");
                execute_job(job, ctx, &fs)
            }
        };

        if outcome.is_failure() {
            warn!(job = %job.name(), ?outcome, "job failed");
        }
        render_outcome(ctx.console(), &outcome);
        summary.record(index, job.name(), outcome);
    }

    render_summary(ctx.console(), &summary);
    info!(
        total = summary.total(),
        skipped = summary.skipped(),
        not_run = summary.not_run(),
        failed = summary.failed(),
        "run pass complete"
    );
    summary
}

fn execute_job(job: &JobRecord, ctx: &mut ExecContext, fs: &Arc<dyn FileSystem>) -> JobOutcome {
    let result = {
        let mut scope = JobScope::running(ctx, Arc::clone(fs));
        job.invocation().call(&mut scope)
    };

    match result {
        Err(JobError::Command(failed)) => JobOutcome::CommandFailed {
            exit_code: failed.exit_code,
            argv: failed.argv,
        },
        Err(other) => JobOutcome::Errored {
            message: other.to_string(),
        },
        Ok(()) => {
            let outputs: Vec<OutputCheck> = job
                .outputs()
                .iter()
                .map(|o| OutputCheck {
                    path: o.path().to_string(),
                    title: o.title(),
                    present: o.verify(),
                })
                .collect();

            if outputs.iter().all(|o| o.present) {
                JobOutcome::Succeeded
            } else {
                JobOutcome::MissingOutputs { outputs }
            }
        }
    }
}
