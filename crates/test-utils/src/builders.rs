#![allow(dead_code)]

use jobqueue::config::{ConfigSection, JobConfig, JobsFile, RawJobsFile};

/// Builder for `JobsFile` to simplify test setup.
pub struct JobsFileBuilder {
    raw: RawJobsFile,
}

impl JobsFileBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawJobsFile::default(),
        }
    }

    pub fn with_job(mut self, job: JobConfig) -> Self {
        self.raw.job.push(job);
        self
    }

    pub fn with_config(mut self, config: ConfigSection) -> Self {
        self.raw.config = config;
        self
    }

    pub fn with_command_prefix(mut self, prefix: &[&str]) -> Self {
        self.raw.config.command_prefix = prefix.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn build(self) -> JobsFile {
        JobsFile::try_from(self.raw).expect("Failed to build valid job file from builder")
    }
}

impl Default for JobsFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one `[[job]]` entry.
pub struct JobConfigBuilder {
    job: JobConfig,
}

impl JobConfigBuilder {
    pub fn new() -> Self {
        Self {
            job: JobConfig {
                name: None,
                inputs: vec![],
                outputs: vec![],
                cmd: vec![],
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.job.name = Some(name.to_string());
        self
    }

    pub fn input(mut self, path: &str) -> Self {
        self.job.inputs.push(path.to_string());
        self
    }

    pub fn output(mut self, path: &str) -> Self {
        self.job.outputs.push(path.to_string());
        self
    }

    pub fn cmd(mut self, argv: &[&str]) -> Self {
        self.job.cmd.push(argv.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn build(self) -> JobConfig {
        self.job
    }
}

impl Default for JobConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
