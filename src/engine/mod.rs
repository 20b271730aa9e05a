// src/engine/mod.rs

//! Run engine: the two passes over the job registry.
//!
//! - [`verify`] classifies every job in order, accumulating the outputs of
//!   jobs that will run, and prints the classification. Nothing executes.
//! - [`run`] walks the jobs again and executes the ones that must run,
//!   recording one [`JobOutcome`] per job.
//!
//! Classification itself is pure and lives in [`crate::analysis`].

pub mod run;
pub mod summary;
pub mod verify;

pub use run::run;
pub use summary::{JobOutcome, JobRun, OutputCheck, RunSummary};
pub use verify::{verify, JobVerdict, VerifyReport};
