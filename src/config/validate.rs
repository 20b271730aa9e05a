// src/config/validate.rs

use crate::config::model::{JobsFile, RawJobsFile};
use crate::errors::{JobqueueError, Result};

impl TryFrom<RawJobsFile> for JobsFile {
    type Error = JobqueueError;

    fn try_from(raw: RawJobsFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_jobs(&raw)?;
        Ok(JobsFile::new_unchecked(raw.config, raw.job))
    }
}

fn validate_raw_jobs(raw: &RawJobsFile) -> Result<()> {
    ensure_has_jobs(raw)?;
    validate_global_config(raw)?;
    validate_commands(raw)?;
    Ok(())
}

fn ensure_has_jobs(raw: &RawJobsFile) -> Result<()> {
    if raw.job.is_empty() {
        return Err(JobqueueError::ConfigError(
            "job file must contain at least one [[job]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(raw: &RawJobsFile) -> Result<()> {
    let cfg = &raw.config;

    if cfg.progress_interval_ms == 0 {
        return Err(JobqueueError::ConfigError(
            "[config].progress_interval_ms must be > 0".to_string(),
        ));
    }
    if cfg.progress_length == 0 {
        return Err(JobqueueError::ConfigError(
            "[config].progress_length must be >= 1 (got 0)".to_string(),
        ));
    }
    if cfg.command_prefix.iter().any(|arg| arg.is_empty()) {
        return Err(JobqueueError::ConfigError(
            "[config].command_prefix must not contain empty arguments".to_string(),
        ));
    }

    Ok(())
}

fn validate_commands(raw: &RawJobsFile) -> Result<()> {
    for (index, job) in raw.job.iter().enumerate() {
        let label = job
            .name
            .clone()
            .unwrap_or_else(|| format!("job #{index}"));

        if job.cmd.is_empty() {
            return Err(JobqueueError::ConfigError(format!(
                "{label} has no commands in `cmd`"
            )));
        }
        if let Some(pos) = job.cmd.iter().position(|argv| argv.is_empty()) {
            return Err(JobqueueError::ConfigError(format!(
                "{label}: command {pos} in `cmd` is empty"
            )));
        }
    }
    Ok(())
}
