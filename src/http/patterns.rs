use super::app_error::AppError;
use super::owner::OwnerId;
use super::state::HttpServerState;
use crate::datamodel::pattern_record::{base_name, now_unix_milliseconds, stored_file_name};
use crate::datamodel::{ClassificationResult, PatternRecord, PatternType};
use crate::importers::csv::classify_csv_bytes;
use anyhow::anyhow;
use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use serde::{Deserialize, Serialize};
use tokio_util::bytes::Bytes;
use tracing::{debug, info, warn};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Short view of a classification, as returned right after an upload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadedPattern {
    #[serde(rename = "type")]
    pub pattern_type: PatternType,
    /// Rounded percentage, e.g. `"85%"`.
    pub confidence: String,
    #[serde(rename = "dataPoints")]
    pub data_points: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub id: Uuid,
    pub pattern: UploadedPattern,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClassifyQuery {
    /// Source name used for the filename hint.
    pub filename: Option<String>,
}

pub fn is_csv_upload(file_name: &str, content_type: Option<&str>) -> bool {
    content_type == Some("text/csv") || file_name.to_lowercase().ends_with(".csv")
}

/// Reads the `file` field of the form. Other fields are ignored.
async fn read_csv_field(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(AppError::bad_request)? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(|name| base_name(name).to_string())
            .unwrap_or_default();
        if !is_csv_upload(&file_name, field.content_type()) {
            return Err(AppError::bad_request(anyhow!("Only CSV files are allowed!")));
        }
        let data = field.bytes().await.map_err(AppError::bad_request)?;
        return Ok((file_name, data));
    }
    Err(AppError::bad_request(anyhow!("No file uploaded")))
}

/// Upload a CSV file and detect its pattern.
///
/// The file name takes part in the classification: names containing
/// keywords such as `fibonacci`, `tide` or `growth` decide the pattern
/// without looking at the data.
#[utoipa::path(
    post,
    path = "/upload/csv",
    tag = "Patterns",
    params(
        ("x-user-id" = String, Header, description = "Identity of the uploader"),
    ),
    request_body(
        content = String,
        content_type = "multipart/form-data",
        description = "Form with a `file` field holding a CSV file with a header row."
    ),
    responses(
        (status = 200, description = "File classified and stored", body = UploadResponse),
        (status = 400, description = "Bad Request", body = AppError),
        (status = 401, description = "Unauthorized", body = AppError),
        (status = 500, description = "Internal Server Error", body = AppError),
    )
)]
pub async fn upload_csv(
    State(state): State<HttpServerState>,
    OwnerId(owner_id): OwnerId,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let (original_name, data) = read_csv_field(&mut multipart).await?;
    let created_at = now_unix_milliseconds()?;

    // Only files that were classified are kept on disk.
    let result = classify_csv_bytes(&state.classifier, &original_name, &data)
        .await
        .map_err(AppError::bad_request)?;

    let stored_path = match &state.upload_directory {
        Some(directory) => {
            let stored_path = directory.join(stored_file_name(created_at, &original_name));
            tokio::fs::create_dir_all(directory).await?;
            tokio::fs::write(&stored_path, &data).await?;
            debug!("Stored upload at {}", stored_path.display());
            Some(stored_path)
        }
        None => None,
    };

    let record = PatternRecord::new(owner_id, original_name, &result, created_at);
    if let Err(error) = state.storage.save_pattern(&record).await {
        if let Some(stored_path) = stored_path {
            if let Err(remove_error) = tokio::fs::remove_file(&stored_path).await {
                warn!(
                    "Failed to remove {}: {}",
                    stored_path.display(),
                    remove_error
                );
            }
        }
        return Err(error.into());
    }
    info!(
        "Stored pattern {} for {}: {}",
        record.id, record.owner_id, record.pattern_type
    );

    Ok(Json(UploadResponse {
        message: "File uploaded and analyzed successfully!".to_string(),
        id: record.id,
        pattern: UploadedPattern {
            pattern_type: result.pattern_type,
            confidence: result.confidence_percent(),
            data_points: result.row_count,
        },
    }))
}

/// List the caller's most recent classifications.
#[utoipa::path(
    get,
    path = "/upload/patterns",
    tag = "Patterns",
    params(
        ("x-user-id" = String, Header, description = "Identity of the uploader"),
    ),
    responses(
        (status = 200, description = "Newest first", body = Vec<PatternRecord>),
        (status = 401, description = "Unauthorized", body = AppError),
        (status = 500, description = "Internal Server Error", body = AppError),
    )
)]
pub async fn list_patterns(
    State(state): State<HttpServerState>,
    OwnerId(owner_id): OwnerId,
) -> Result<Json<Vec<PatternRecord>>, AppError> {
    let patterns = state
        .storage
        .list_patterns(&owner_id, state.max_listed_patterns)
        .await?;
    Ok(Json(patterns))
}

/// Get one of the caller's classifications.
#[utoipa::path(
    get,
    path = "/upload/patterns/{id}",
    tag = "Patterns",
    params(
        ("id" = Uuid, Path, description = "Pattern identifier"),
        ("x-user-id" = String, Header, description = "Identity of the uploader"),
    ),
    responses(
        (status = 200, description = "The classification", body = PatternRecord),
        (status = 401, description = "Unauthorized", body = AppError),
        (status = 404, description = "Not Found", body = AppError),
    )
)]
pub async fn get_pattern(
    State(state): State<HttpServerState>,
    OwnerId(owner_id): OwnerId,
    Path(id): Path<Uuid>,
) -> Result<Json<PatternRecord>, AppError> {
    match state.storage.get_pattern(id).await? {
        // Someone else's record is reported as missing.
        Some(record) if record.owner_id == owner_id => Ok(Json(record)),
        _ => Err(AppError::not_found(anyhow!("Pattern not found: {}", id))),
    }
}

/// Classify a raw CSV body without storing anything.
#[utoipa::path(
    post,
    path = "/classify",
    tag = "Patterns",
    params(ClassifyQuery),
    request_body(
        content = String,
        content_type = "text/csv",
        description = "CSV data with a header row.",
        example = "n\n1\n1\n2\n3\n5\n8\n"
    ),
    responses(
        (status = 200, description = "Classification result", body = ClassificationResult),
        (status = 400, description = "Bad Request", body = AppError),
    )
)]
pub async fn classify(
    State(state): State<HttpServerState>,
    Query(query): Query<ClassifyQuery>,
    bytes: Bytes,
) -> Result<Json<ClassificationResult>, AppError> {
    let source_name = query
        .filename
        .as_deref()
        .map(base_name)
        .unwrap_or_default();
    let result = classify_csv_bytes(&state.classifier, source_name, &bytes)
        .await
        .map_err(AppError::bad_request)?;
    Ok(Json(result))
}
