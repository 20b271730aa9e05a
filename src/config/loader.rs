// src/config/loader.rs

use std::path::{Path, PathBuf};

use crate::config::model::{JobsFile, RawJobsFile};
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};

/// Read and deserialize a job file, without semantic validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawJobsFile> {
    load_from_path_with(&RealFileSystem, path)
}

pub fn load_from_path_with(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawJobsFile> {
    let contents = fs.read_to_string(path.as_ref())?;
    let raw: RawJobsFile = toml::from_str(&contents)?;
    Ok(raw)
}

/// Load a job file and validate it.
///
/// Defaults are applied by `serde`; validation checks that there is at least
/// one job, that every job has non-empty commands and that the `[config]`
/// values are usable.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<JobsFile> {
    load_and_validate_with(&RealFileSystem, path)
}

pub fn load_and_validate_with(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<JobsFile> {
    let raw = load_from_path_with(fs, path)?;
    JobsFile::try_from(raw)
}

/// `Jobs.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Jobs.toml")
}
