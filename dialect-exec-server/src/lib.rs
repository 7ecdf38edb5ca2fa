use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use dialect_exec::{ExecutionRequest, ExecutionResponse, ExecutionService, RunnerConfig};
use serde_json::{json, Value};
use std::{net::SocketAddr, sync::Arc};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<dialect_exec::Error> for ServerError {
    fn from(e: dialect_exec::Error) -> Self {
        match e {
            dialect_exec::Error::EmptyCode => ServerError::BadRequest(e.to_string()),
            e => ServerError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => {
                error!("{}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    service: Arc<ExecutionService>,
}

/// Build the router around a service constructed from `config`
pub async fn create_app(config: RunnerConfig) -> Result<Router, ServerError> {
    let service = ExecutionService::new(config).await?;
    Ok(router(service))
}

/// Build the router around an existing service
pub fn router(service: ExecutionService) -> Router {
    let state = AppState {
        service: Arc::new(service),
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/execute", post(execute))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), ServerError> {
    info!("Starting Machine Dialect runner on {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?;

    Ok(())
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Machine Dialect Runner API",
        "description": "Send Machine Dialect™ code to /execute endpoint",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "machine-dialect-runner" }))
}

async fn execute(
    State(state): State<AppState>,
    Json(request): Json<ExecutionRequest>,
) -> Result<Json<ExecutionResponse>, ServerError> {
    let service = state.service.clone();

    // Spawned so that a dropped connection does not cancel a running pipeline.
    let response = tokio::spawn(async move { service.execute(request).await })
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??;

    if !response.success {
        return Err(ServerError::BadRequest(response.error.unwrap_or_default()));
    }

    Ok(Json(response))
}
