// src/config/mod.rs

//! Declarative job files.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a job file from disk (`loader.rs`).
//! - Validate it (`validate.rs`).
//! - Register its jobs on a [`Registry`](crate::job::Registry) (`register.rs`).
//! - Merge `[config]` with CLI overrides (`settings.rs`).

pub mod loader;
pub mod model;
pub mod register;
pub mod settings;
pub mod validate;

pub use loader::{
    default_config_path, load_and_validate, load_and_validate_with, load_from_path,
    load_from_path_with,
};
pub use model::{ConfigSection, JobConfig, JobsFile, RawJobsFile};
pub use register::{declarative_job, register_jobs};
pub use settings::Settings;
