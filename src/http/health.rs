use super::state::HttpServerState;
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Outcome of one readiness check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    Ok,
    Failed { error: String },
}

impl CheckOutcome {
    fn from_result<E: std::fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => CheckOutcome::Ok,
            Err(error) => CheckOutcome::Failed {
                error: error.to_string(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, CheckOutcome::Ok)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    /// `ready` or `not_ready`.
    pub status: String,
    pub pattern_store: CheckOutcome,
    /// Absent when uploads are not kept on disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_directory: Option<CheckOutcome>,
    /// Classification chain, in the order strategies are tried.
    pub strategies: Vec<String>,
}

/// The directory is created on the first upload, so a missing one is fine.
async fn check_upload_directory(directory: &Path) -> Result<(), String> {
    match tokio::fs::metadata(directory).await {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(format!("{} is not a directory", directory.display())),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(error.to_string()),
    }
}

/// Liveness check
///
/// Always 200 OK while the server answers.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Readiness check
///
/// Ready once the pattern store answers and the upload directory, if any, is usable.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse)
    )
)]
pub async fn readiness(
    State(state): State<HttpServerState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let pattern_store = CheckOutcome::from_result(state.storage.health_check().await);
    let upload_directory = match &state.upload_directory {
        Some(directory) => Some(CheckOutcome::from_result(
            check_upload_directory(directory).await,
        )),
        None => None,
    };

    let ready = pattern_store.is_ok() && upload_directory.as_ref().is_none_or(CheckOutcome::is_ok);
    let (code, status) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (
        code,
        Json(ReadinessResponse {
            status: status.to_string(),
            pattern_store,
            upload_directory,
            strategies: state
                .classifier
                .strategy_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }),
    )
}
