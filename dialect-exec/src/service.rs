use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

use crate::{
    compiler::DialectCompiler,
    config::RunnerConfig,
    error::Error,
    pipeline::Pipeline,
    types::{ExecutionRequest, ExecutionResponse},
};

/// Shared entry point for executing Machine Dialect programs.
///
/// Cheap to clone; all clones share the same concurrency limit.
#[derive(Clone)]
pub struct ExecutionService {
    pipeline: Arc<Pipeline>,
    semaphore: Arc<Semaphore>,
}

impl ExecutionService {
    pub async fn new(config: RunnerConfig) -> Result<Self, Error> {
        let pipeline = Pipeline::new(&config);
        Self::with_pipeline(&config, pipeline).await
    }

    /// Service backed by a custom compiler implementation
    pub async fn with_compiler(
        config: RunnerConfig,
        compiler: Arc<dyn DialectCompiler>,
    ) -> Result<Self, Error> {
        let pipeline = Pipeline::with_compiler(&config, compiler);
        Self::with_pipeline(&config, pipeline).await
    }

    async fn with_pipeline(config: &RunnerConfig, pipeline: Pipeline) -> Result<Self, Error> {
        let work_dir = config.work_dir();
        tokio::fs::create_dir_all(&work_dir).await.map_err(|e| {
            Error::System(format!(
                "Failed to create work directory {}: {}",
                work_dir.display(),
                e
            ))
        })?;

        Ok(Self {
            pipeline: Arc::new(pipeline),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent_executions.max(1))),
        })
    }

    /// Validate and execute one request.
    ///
    /// Returns `Err` for empty code and for failures outside the pipeline's
    /// own error mapping; everything else is an [`ExecutionResponse`].
    pub async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionResponse, Error> {
        request.validate()?;

        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| Error::System(format!("Failed to acquire execution permit: {}", e)))?;

        let span = info_span!("execution", request_id = %Uuid::new_v4(), debug = request.debug);
        async {
            debug!("Starting pipeline");
            let result = self.pipeline.run(&request).await;

            match &result {
                Ok(response) if response.success => info!("Execution completed successfully"),
                Ok(response) => info!(
                    "Execution failed: {}",
                    response.error.as_deref().unwrap_or_default()
                ),
                Err(e) => error!("Execution aborted: {}", e),
            }

            result
        }
        .instrument(span)
        .await
    }

    pub fn get_available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }
}
