//! Common test utilities for integration tests
//!
//! This module contains the shared fixture used across integration tests.
//! It is not compiled into the library.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated generated-site output tree with automatic cleanup
///
/// Stands in for the directory a site builder just wrote, allowing tests to
/// run in parallel without interfering with each other.
pub struct SiteFixture {
    _out_dir: TempDir,
    out_path: PathBuf,
}

impl SiteFixture {
    /// Create an empty output tree
    pub fn new() -> Result<Self> {
        let out_dir = TempDir::new()?;
        Ok(Self {
            out_path: out_dir.path().to_path_buf(),
            _out_dir: out_dir,
        })
    }

    /// Write a generated file at a path relative to the output root,
    /// creating parent directories as needed, and return its absolute path
    pub fn write_page(&self, rel: impl AsRef<Path>, contents: &str) -> Result<PathBuf> {
        let path = self.out_path.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Read a generated file back
    pub fn read_page(&self, rel: impl AsRef<Path>) -> Result<String> {
        Ok(fs::read_to_string(self.out_path.join(rel))?)
    }

    /// Path to the output root
    pub fn out_path(&self) -> &Path {
        &self.out_path
    }
}
