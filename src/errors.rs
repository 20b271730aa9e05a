// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::job::RegistryError;

#[derive(Error, Debug)]
pub enum JobqueueError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Jobs have errors. Aborting. ({0} job(s) failed verification)")]
    JobsHaveErrors(usize),

    #[error("Spawner error: {0}")]
    Spawner(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, JobqueueError>;
