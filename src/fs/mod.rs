// src/fs/mod.rs

//! Filesystem seam used by path resources and the job-file loader.
//!
//! Resource `verify()` calls go through [`FileSystem::exists`], so tests can
//! run whole verify/run passes against a [`mock::MockFileSystem`] and let a
//! fake executor "produce" outputs by writing into it.

use std::fmt::Debug;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub mod mock;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// File or directory.
    fn exists(&self, path: &Path) -> bool;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_fs_sees_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("summary");
        let fs = RealFileSystem;

        assert!(!fs.exists(&target));
        std::fs::write(&target, "ok").unwrap();

        assert!(fs.exists(&target));
        assert!(fs.exists(dir.path()));
        assert_eq!(fs.read_to_string(&target).unwrap(), "ok");
    }

    #[test]
    fn reading_a_missing_file_names_the_path() {
        let err = RealFileSystem
            .read_to_string(Path::new("/definitely/not/here/Jobs.toml"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("Jobs.toml"));
    }
}
