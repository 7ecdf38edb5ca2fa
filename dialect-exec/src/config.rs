use std::path::PathBuf;
use std::time::Duration;

/// Toolchain and resource settings for the pipeline
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Toolchain executable, a bare name is looked up on `PATH`
    pub program: String,
    /// Arguments placed before the subcommand, e.g. `-m machine_dialect`
    pub program_args: Vec<String>,
    /// Wall-clock budget for the run step
    pub execution_timeout: Duration,
    /// Wall-clock budget for the compile step
    pub compile_timeout: Duration,
    /// Directory for staged sources and artifacts (system temp dir if unset)
    pub work_dir: Option<PathBuf>,
    /// Maximum number of pipelines running at once
    pub max_concurrent_executions: usize,
}

impl RunnerConfig {
    pub fn work_dir(&self) -> PathBuf {
        self.work_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: "machine-dialect".to_string(),
            program_args: Vec::new(),
            execution_timeout: Duration::from_secs(30),
            compile_timeout: Duration::from_secs(60),
            work_dir: None,
            max_concurrent_executions: 10,
        }
    }
}
