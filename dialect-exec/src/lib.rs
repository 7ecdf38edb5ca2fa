//! # Machine Dialect Execution
//!
//! Drives the external Machine Dialect toolchain through a compile step and a
//! run step for one submitted program, and maps every outcome into a single
//! [`ExecutionResponse`]. Ephemeral files are removed on every exit path.

mod compiler;
mod config;
mod error;
mod pipeline;
mod resources;
mod runner;
mod service;
mod stager;
mod types;

#[cfg(test)]
mod tests;

pub use compiler::{artifact_path_for, CommandCompiler, DialectCompiler, ARTIFACT_EXTENSION};
pub use config::RunnerConfig;
pub use error::{Error, ErrorKind};
pub use pipeline::Pipeline;
pub use resources::ResourcePair;
pub use runner::{ProcessRunner, RunOutput};
pub use service::ExecutionService;
pub use stager::SourceStager;
pub use types::{DebugInfo, ExecutionRequest, ExecutionResponse};

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
