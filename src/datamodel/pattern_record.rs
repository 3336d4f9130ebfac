use super::classification::{ClassificationResult, Summary};
use super::pattern_type::PatternType;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A stored classification, owned by the user who uploaded the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatternRecord {
    pub id: Uuid,
    pub owner_id: String,
    /// Unique name the upload was stored under.
    pub filename: String,
    pub original_name: String,
    pub pattern_type: PatternType,
    pub confidence: f64,
    pub row_count: i64,
    pub numeric_value_count: i64,
    pub summary: Summary,
    /// Unix timestamp in milliseconds.
    pub created_at: i64,
}

impl PatternRecord {
    pub fn new(
        owner_id: String,
        original_name: String,
        result: &ClassificationResult,
        created_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            filename: stored_file_name(created_at, &original_name),
            original_name,
            pattern_type: result.pattern_type,
            confidence: result.confidence,
            row_count: result.row_count as i64,
            numeric_value_count: result.numeric_value_count as i64,
            summary: result.summary,
            created_at,
        }
    }
}

/// `<unix-ms>-<basename>`, so two uploads of the same file never collide on disk.
pub fn stored_file_name(created_at: i64, original_name: &str) -> String {
    format!("{}-{}", created_at, base_name(original_name))
}

pub fn now_unix_milliseconds() -> Result<i64> {
    let now = hifitime::Epoch::now()
        .map_err(|error| anyhow!("Failed to read the system clock: {}", error))?;
    Ok(now.to_unix_milliseconds().round() as i64)
}

/// Strips any directory component a client may have sent along with the name.
pub fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}
