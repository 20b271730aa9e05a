// src/analysis/classify.rs

use std::collections::HashSet;
use std::sync::Arc;

use super::{ItemAnalysis, ItemStatus, JobAnalysis, JobStatus, Note};
use crate::job::{JobRecord, Resource};

/// Classify a job against the outputs earlier jobs are expected to produce.
pub fn classify(job: &JobRecord, generated: &HashSet<String>) -> JobAnalysis {
    classify_resources(job.inputs(), job.outputs(), generated)
}

/// Same as [`classify`], on bare resource lists.
///
/// Inputs, in order:
/// duplicate path → `Error`; verifies → `Available`; planned by an earlier
/// job → `Planned`; otherwise `Error`.
///
/// Outputs, in order:
/// already generated or duplicated within the job → `Error`; verifies →
/// `Done`; otherwise `Run`.
pub fn classify_resources(
    inputs: &[Arc<dyn Resource>],
    outputs: &[Arc<dyn Resource>],
    generated: &HashSet<String>,
) -> JobAnalysis {
    let mut seen_inputs: HashSet<&str> = HashSet::new();
    let inputs: Vec<ItemAnalysis> = inputs
        .iter()
        .map(|input| {
            let path = input.path();
            let (status, note) = if !seen_inputs.insert(path) {
                (ItemStatus::Error, Some(Note::InputDuplicated))
            } else if input.verify() {
                (ItemStatus::Available, None)
            } else if generated.contains(path) {
                (ItemStatus::Planned, None)
            } else {
                (ItemStatus::Error, Some(Note::InputNotAvailable))
            };
            item(input.as_ref(), status, note)
        })
        .collect();

    let mut seen_outputs: HashSet<&str> = HashSet::new();
    let outputs: Vec<ItemAnalysis> = outputs
        .iter()
        .map(|output| {
            let path = output.path();
            let fresh = seen_outputs.insert(path);
            let (status, note) = if !fresh || generated.contains(path) {
                (ItemStatus::Error, Some(Note::ResultDuplicated))
            } else if output.verify() {
                (ItemStatus::Done, Some(Note::ResultComputed))
            } else {
                (ItemStatus::Run, None)
            };
            item(output.as_ref(), status, note)
        })
        .collect();

    let status = aggregate(inputs.iter().chain(outputs.iter()).map(|i| i.status));

    JobAnalysis {
        status,
        inputs,
        outputs,
    }
}

/// Fold item statuses into a job verdict.
///
/// A job is atomic: all outputs done, or all outputs to run. A mix of the
/// two, any error, or no items at all is an error.
pub fn aggregate(statuses: impl IntoIterator<Item = ItemStatus>) -> JobStatus {
    let statuses: HashSet<ItemStatus> = statuses.into_iter().collect();

    let has_done = statuses.contains(&ItemStatus::Done);
    let has_run = statuses.contains(&ItemStatus::Run);

    if statuses.contains(&ItemStatus::Error) || (has_done && has_run) {
        JobStatus::Error
    } else if has_done {
        JobStatus::Done
    } else if has_run {
        JobStatus::Run
    } else {
        JobStatus::Error
    }
}

fn item(resource: &dyn Resource, status: ItemStatus, note: Option<Note>) -> ItemAnalysis {
    ItemAnalysis {
        path: resource.path().to_string(),
        title: resource.title(),
        status,
        note,
    }
}
