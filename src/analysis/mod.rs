// src/analysis/mod.rs

//! Dependency classification.
//!
//! Pure functions only: no IO beyond the resources' own `verify()` calls, no
//! engine state. Both the verify pass and the run pass call [`classify`] and
//! differ only in the set of "already generated" paths they pass in.

pub mod classify;

use std::fmt;

pub use classify::{aggregate, classify, classify_resources};

/// Status of a single input or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemStatus {
    /// Input exists now.
    Available,
    /// Input will be produced by an earlier job in this sweep.
    Planned,
    /// Output already exists.
    Done,
    /// Output must be produced.
    Run,
    Error,
}

/// Aggregate verdict for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Done,
    Run,
    Error,
}

/// Why an item got its status, when that is worth telling the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Note {
    InputDuplicated,
    InputNotAvailable,
    ResultDuplicated,
    ResultComputed,
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Note::InputDuplicated => "Input is duplicated.",
            Note::InputNotAvailable => "Input is not available.",
            Note::ResultDuplicated => "Result is duplicated.",
            Note::ResultComputed => "Result already computed.",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAnalysis {
    pub path: String,
    pub title: String,
    pub status: ItemStatus,
    pub note: Option<Note>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobAnalysis {
    pub status: JobStatus,
    pub inputs: Vec<ItemAnalysis>,
    pub outputs: Vec<ItemAnalysis>,
}

impl JobAnalysis {
    pub fn input_statuses(&self) -> Vec<ItemStatus> {
        self.inputs.iter().map(|i| i.status).collect()
    }

    pub fn output_statuses(&self) -> Vec<ItemStatus> {
        self.outputs.iter().map(|o| o.status).collect()
    }
}
