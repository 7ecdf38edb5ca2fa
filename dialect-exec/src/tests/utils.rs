use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::time::Duration;

use super::fixtures::STUB_TOOLCHAIN;
use crate::RunnerConfig;

pub mod defaults {
    use super::*;

    pub fn default_timeout() -> Duration {
        Duration::from_secs(10)
    }

    pub fn short_timeout() -> Duration {
        Duration::from_secs(1)
    }
}

/// Stub toolchain plus an isolated work directory, removed on drop
pub struct TestToolchain {
    _root: TempDir,
    script: PathBuf,
    work_dir: PathBuf,
}

impl TestToolchain {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        let script = root.path().join("machine-dialect.sh");
        std::fs::write(&script, STUB_TOOLCHAIN).expect("Failed to write stub toolchain");
        let work_dir = root.path().join("work");
        std::fs::create_dir(&work_dir).expect("Failed to create work dir");

        Self {
            _root: root,
            script,
            work_dir,
        }
    }

    /// Config running the stub through `sh`, so the script needs no exec bit
    pub fn config(&self, execution_timeout: Duration) -> RunnerConfig {
        RunnerConfig {
            program: "sh".to_string(),
            program_args: vec![self.script.to_string_lossy().into_owned()],
            execution_timeout,
            compile_timeout: defaults::default_timeout(),
            work_dir: Some(self.work_dir.clone()),
            max_concurrent_executions: 4,
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Files left behind in the work directory
    pub fn leftovers(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.work_dir)
            .expect("Failed to read work dir")
            .map(|entry| entry.expect("Failed to read entry").path())
            .collect()
    }
}
