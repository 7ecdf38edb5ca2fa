use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::compiler::artifact_path_for;

/// The ephemeral source file of one request and the artifact compiled from it.
///
/// Both files are deleted when the pair is dropped, whichever way the
/// pipeline exits. Files that were never created are skipped.
#[derive(Debug)]
pub struct ResourcePair {
    source_path: PathBuf,
    artifact_path: PathBuf,
}

impl ResourcePair {
    /// Take ownership of a staged source file
    pub fn new(source_path: PathBuf) -> Self {
        let artifact_path = artifact_path_for(&source_path);
        Self {
            source_path,
            artifact_path,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }
}

impl Drop for ResourcePair {
    fn drop(&mut self) {
        for path in [&self.source_path, &self.artifact_path] {
            match std::fs::remove_file(path) {
                Ok(()) => debug!("Removed {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
            }
        }
    }
}
