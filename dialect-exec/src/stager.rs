use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

use crate::{error::Error, resources::ResourcePair};

/// Source file extension expected by the compiler
pub const SOURCE_EXTENSION: &str = "md";

/// Writes submitted code into uniquely named files under a work directory
#[derive(Debug, Clone)]
pub struct SourceStager {
    work_dir: PathBuf,
}

impl SourceStager {
    pub fn new(work_dir: PathBuf) -> Self {
        Self { work_dir }
    }

    /// Write `code` verbatim to a fresh file and hand it over as a [`ResourcePair`]
    pub fn stage(&self, code: &str) -> Result<ResourcePair, Error> {
        let suffix = format!(".{}", SOURCE_EXTENSION);
        let mut file = tempfile::Builder::new()
            .prefix("dialect-")
            .suffix(&suffix)
            .tempfile_in(&self.work_dir)
            .map_err(Error::Staging)?;

        // Dropping `file` on a failed write removes it.
        file.write_all(code.as_bytes()).map_err(Error::Staging)?;
        file.flush().map_err(Error::Staging)?;

        let path = file
            .into_temp_path()
            .keep()
            .map_err(|e| Error::Staging(e.error))?;
        debug!("Staged source at {}", path.display());

        Ok(ResourcePair::new(path))
    }
}
