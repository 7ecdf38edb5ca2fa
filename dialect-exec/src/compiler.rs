use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{error::Error, runner::ProcessRunner};

/// Extension of compiled bytecode artifacts
pub const ARTIFACT_EXTENSION: &str = "mdbc";

/// Path of the artifact the compiler produces for `source`.
///
/// Purely textual, the filesystem is not consulted.
pub fn artifact_path_for(source: &Path) -> PathBuf {
    source.with_extension(ARTIFACT_EXTENSION)
}

/// External compile operation
#[async_trait]
pub trait DialectCompiler: Send + Sync {
    /// Compile `source` into [`artifact_path_for`]`(source)`.
    ///
    /// `Ok(false)` means the compiler rejected the program. No further detail
    /// is available from the toolchain.
    async fn compile(&self, source: &Path) -> Result<bool, Error>;
}

/// Compiles through the toolchain's `compile` subcommand
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    runner: ProcessRunner,
}

impl CommandCompiler {
    pub fn new(runner: ProcessRunner) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl DialectCompiler for CommandCompiler {
    async fn compile(&self, source: &Path) -> Result<bool, Error> {
        let args: Vec<OsString> = vec!["compile".into(), source.into()];
        match self.runner.execute(&args).await {
            Ok(output) => {
                if !output.success() {
                    debug!(
                        exit_code = ?output.exit_code,
                        "Compiler rejected {}: {}",
                        source.display(),
                        output.stderr.trim()
                    );
                }
                Ok(output.success())
            }
            Err(Error::Timeout(secs)) => {
                warn!("Compilation of {} exceeded {}s", source.display(), secs);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
