//! Removal of temporary artifacts
//!
//! The downloaded installer must not outlive the run, whether installation
//! succeeded, failed or the run aborted with a fatal error.
//!
//! ## Usage
//!
//! ```ignore
//! let mut artifacts = ArtifactCleanup::new(true);
//! artifacts.track(&installer_path);
//!
//! // Install...
//!
//! // At the end of the run, collecting failures as warnings:
//! let failures = artifacts.remove_all();
//!
//! // On an early return, Drop removes whatever is still tracked.
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A tracked file that could not be removed
#[derive(Debug)]
pub struct CleanupFailure {
    pub path: PathBuf,
    pub error: io::Error,
}

/// Temporary files removed at the end of a run
#[derive(Debug)]
pub struct ArtifactCleanup {
    /// Files to remove, in tracking order
    tracked: Vec<PathBuf>,

    /// Whether removal is enabled (disabled for dry runs)
    enabled: bool,
}

impl ArtifactCleanup {
    pub fn new(enabled: bool) -> Self {
        Self {
            tracked: Vec::new(),
            enabled,
        }
    }

    /// Track a file for removal
    pub fn track(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.tracked.contains(&path) {
            self.tracked.push(path);
        }
    }

    #[cfg(test)]
    pub fn tracked(&self) -> &[PathBuf] {
        &self.tracked
    }

    /// Remove all tracked files now
    ///
    /// Files that are already gone count as removed. Failed removals are
    /// returned; they are not retried on drop.
    pub fn remove_all(&mut self) -> Vec<CleanupFailure> {
        let tracked = std::mem::take(&mut self.tracked);
        if !self.enabled {
            return Vec::new();
        }

        tracked
            .into_iter()
            .filter_map(|path| match remove_file(&path) {
                Ok(()) => None,
                Err(error) => Some(CleanupFailure { path, error }),
            })
            .collect()
    }
}

fn remove_file(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            log::debug!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

impl Drop for ArtifactCleanup {
    fn drop(&mut self) {
        for failure in self.remove_all() {
            eprintln!(
                "Warning: Failed to remove {}: {}",
                failure.path.display(),
                failure.error
            );
        }
    }
}
