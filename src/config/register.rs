// src/config/register.rs

//! Turn `[[job]]` entries into registered jobs.
//!
//! Declarative jobs go through the same two-phase registration as jobs
//! written in Rust, so the verify and run passes cannot tell them apart.

use tracing::debug;

use crate::config::model::{JobConfig, JobsFile};
use crate::errors::Result;
use crate::job::{JobDef, Registry};

/// Routine name shared by every job coming from a job file.
pub const DECLARATIVE_ROUTINE: &str = "job";

/// Body for a declarative job: declare paths, then run each `cmd` in order,
/// stopping at the first failure.
pub fn declarative_job() -> JobDef<(usize, JobConfig)> {
    JobDef::new(DECLARATIVE_ROUTINE, |job, (index, cfg): &(usize, JobConfig)| {
        job.name(
            cfg.name
                .clone()
                .unwrap_or_else(|| format!("job #{index}")),
        );
        for path in &cfg.inputs {
            job.input_path(path.as_str());
        }
        for path in &cfg.outputs {
            job.output_path(path.as_str());
        }

        let Some(mut cmd) = job.commit() else {
            return Ok(());
        };
        for argv in &cfg.cmd {
            cmd.run(argv.iter().cloned())?;
        }
        Ok(())
    })
}

/// Register every job of `file`, in file order. Returns their indices.
pub fn register_jobs(file: &JobsFile, registry: &mut Registry) -> Result<Vec<usize>> {
    let def = declarative_job();
    let mut indices = Vec::with_capacity(file.job.len());

    for (index, cfg) in file.job.iter().enumerate() {
        let idx = registry.schedule(&def, (index, cfg.clone()))?;
        indices.push(idx);
    }

    debug!(count = indices.len(), "declarative jobs registered");
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::model::ConfigSection;
    use crate::fs::mock::MockFileSystem;

    fn jobs_file() -> JobsFile {
        JobsFile::new_unchecked(
            ConfigSection::default(),
            vec![
                JobConfig {
                    name: Some("first".to_string()),
                    inputs: vec!["in.txt".to_string()],
                    outputs: vec!["mid.txt".to_string()],
                    cmd: vec![vec!["make".to_string(), "mid".to_string()]],
                },
                JobConfig {
                    name: None,
                    inputs: vec!["mid.txt".to_string()],
                    outputs: vec!["a.txt".to_string(), "b.txt".to_string()],
                    cmd: vec![vec!["make".to_string()]],
                },
            ],
        )
    }

    #[test]
    fn registers_jobs_in_file_order() {
        let mut reg = Registry::new(Arc::new(MockFileSystem::new()));
        let indices = register_jobs(&jobs_file(), &mut reg).unwrap();

        assert_eq!(indices, vec![0, 1]);
        assert_eq!(reg.jobs()[0].name(), "first");
        assert_eq!(reg.jobs()[1].name(), "job #1");
        assert_eq!(
            reg.jobs()[1].output_paths().collect::<Vec<_>>(),
            vec!["a.txt", "b.txt"]
        );
        assert_eq!(reg.jobs()[1].inputs()[0].path(), "mid.txt");
    }

    #[test]
    fn appends_after_existing_jobs() {
        let mut reg = Registry::new(Arc::new(MockFileSystem::new()));
        register_jobs(&jobs_file(), &mut reg).unwrap();
        let indices = register_jobs(&jobs_file(), &mut reg).unwrap();
        assert_eq!(indices, vec![2, 3]);
    }
}
