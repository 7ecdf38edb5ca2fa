use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Error;

/// Diagnostic details attached to a response in debug mode
pub type DebugInfo = HashMap<String, String>;

/// Code execution request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Machine Dialect source code to execute
    pub code: String,
    /// Enable debug mode for execution
    #[serde(default)]
    pub debug: bool,
}

impl ExecutionRequest {
    pub fn new(code: impl Into<String>, debug: bool) -> Self {
        Self {
            code: code.into(),
            debug,
        }
    }

    /// Reject code that is empty after trimming whitespace
    pub fn validate(&self) -> Result<(), Error> {
        if self.code.trim().is_empty() {
            return Err(Error::EmptyCode);
        }
        Ok(())
    }
}

/// Outcome of one compile-and-run pipeline.
///
/// Exactly one of `result` and `error` is populated, matching `success`.
/// Use [`ExecutionResponse::success`] and [`ExecutionResponse::failure`] to
/// build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResponse {
    /// Whether execution was successful
    pub success: bool,
    /// Program output
    pub result: Option<String>,
    /// Error message if execution failed
    pub error: Option<String>,
    /// Debug information if debug mode was enabled
    pub debug_info: Option<DebugInfo>,
}

impl ExecutionResponse {
    pub fn success(result: impl Into<String>, debug_info: Option<DebugInfo>) -> Self {
        Self {
            success: true,
            result: Some(result.into()),
            error: None,
            debug_info,
        }
    }

    pub fn failure(error: impl Into<String>, debug_info: Option<DebugInfo>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
            debug_info,
        }
    }
}
