// src/job/resource.rs

use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;

use crate::fs::FileSystem;

/// Anything a job can consume or produce.
///
/// `path` identifies the resource and is what dependency matching compares.
/// `verify` must be side-effect free: the engine calls it during both passes,
/// including long before the producing job has run.
pub trait Resource: Send + Sync + Debug {
    fn path(&self) -> &str;

    /// Human readable label used in reports.
    fn title(&self) -> String;

    /// `true` iff the resource currently exists / is valid.
    fn verify(&self) -> bool;
}

/// Generic resource identified by a filesystem path.
///
/// Verifies by existence (file or directory).
#[derive(Debug, Clone)]
pub struct PathResource {
    path: String,
    fs: Arc<dyn FileSystem>,
}

impl PathResource {
    pub fn new(path: impl Into<String>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }
}

impl Resource for PathResource {
    fn path(&self) -> &str {
        &self.path
    }

    fn title(&self) -> String {
        format!("\"{}\"", self.path)
    }

    fn verify(&self) -> bool {
        self.fs.exists(Path::new(&self.path))
    }
}
