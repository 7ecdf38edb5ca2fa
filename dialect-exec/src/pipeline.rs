use std::sync::Arc;
use tracing::{debug, error, info};

use crate::{
    compiler::{CommandCompiler, DialectCompiler},
    config::RunnerConfig,
    error::{Error, ErrorKind},
    resources::ResourcePair,
    runner::{ProcessRunner, RunOutput},
    stager::SourceStager,
    types::{DebugInfo, ExecutionRequest, ExecutionResponse},
};

const EMPTY_OUTPUT_RESULT: &str = "Execution completed successfully";

/// Stage, compile, run and clean up one program
#[derive(Clone)]
pub struct Pipeline {
    stager: SourceStager,
    compiler: Arc<dyn DialectCompiler>,
    runner: ProcessRunner,
}

impl Pipeline {
    /// Pipeline that compiles and runs through the configured toolchain executable
    pub fn new(config: &RunnerConfig) -> Self {
        let compile_runner = ProcessRunner::new(
            config.program.clone(),
            config.program_args.clone(),
            config.compile_timeout,
        );
        Self::with_compiler(config, Arc::new(CommandCompiler::new(compile_runner)))
    }

    pub fn with_compiler(config: &RunnerConfig, compiler: Arc<dyn DialectCompiler>) -> Self {
        Self {
            stager: SourceStager::new(config.work_dir()),
            compiler,
            runner: ProcessRunner::new(
                config.program.clone(),
                config.program_args.clone(),
                config.execution_timeout,
            ),
        }
    }

    /// Execute `request` and report the outcome.
    ///
    /// Compile, run and unexpected failures are folded into a failed
    /// [`ExecutionResponse`]. Only a staging failure is returned as `Err`.
    /// Staged files are gone by the time this returns.
    pub async fn run(&self, request: &ExecutionRequest) -> Result<ExecutionResponse, Error> {
        let resources = self.stager.stage(&request.code)?;
        debug!("Staged {}", resources.source_path().display());

        let outcome = self.compile_and_run(&resources, request.debug).await;
        let response = map_outcome(outcome, request.debug);

        drop(resources);
        debug!(success = response.success, "Cleaned up pipeline resources");

        Ok(response)
    }

    async fn compile_and_run(
        &self,
        resources: &ResourcePair,
        debug: bool,
    ) -> Result<ExecutionResponse, Error> {
        if !self.compiler.compile(resources.source_path()).await? {
            return Err(Error::Compilation);
        }
        debug!("Compiled {}", resources.artifact_path().display());

        let output = self
            .runner
            .run_artifact(resources.artifact_path(), debug)
            .await?;
        debug!(exit_code = ?output.exit_code, "Executed artifact");

        Ok(response_from_run(output, debug))
    }
}

fn response_from_run(output: RunOutput, debug: bool) -> ExecutionResponse {
    if output.success() {
        // Emptiness is judged before trimming: whitespace-only output yields "".
        let result = if output.stdout.is_empty() {
            EMPTY_OUTPUT_RESULT
        } else {
            output.stdout.trim()
        };
        let debug_info = (debug && !output.stderr.is_empty())
            .then(|| DebugInfo::from([("stderr".to_string(), output.stderr.clone())]));
        return ExecutionResponse::success(result, debug_info);
    }

    let exit_code = output.exit_code.unwrap_or(-1);
    info!(kind = %ErrorKind::Runtime, exit_code, "Program failed");

    let error = if output.stderr.is_empty() {
        Error::Runtime(exit_code).to_string()
    } else {
        output.stderr.trim().to_string()
    };
    let debug_info = debug.then(|| {
        DebugInfo::from([
            ("stdout".to_string(), output.stdout.clone()),
            ("stderr".to_string(), output.stderr.clone()),
        ])
    });
    ExecutionResponse::failure(error, debug_info)
}

fn map_outcome(outcome: Result<ExecutionResponse, Error>, debug: bool) -> ExecutionResponse {
    match outcome {
        Ok(response) => response,
        Err(e @ (Error::Compilation | Error::Timeout(_))) => {
            info!(kind = %e.kind(), "{}", e);
            ExecutionResponse::failure(e.to_string(), None)
        }
        Err(e) => {
            error!(kind = %e.kind(), "Unexpected pipeline failure: {}", e);
            let debug_info = debug.then(|| {
                DebugInfo::from([("exception_type".to_string(), e.kind().to_string())])
            });
            ExecutionResponse::failure(format!("Unexpected error: {}", e), debug_info)
        }
    }
}
