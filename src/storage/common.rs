use super::error::StorageError;
use crate::datamodel::{PatternRecord, PatternType, Summary};
use std::str::FromStr;
use uuid::Uuid;

/// A `patterns` row as the databases return it.
#[derive(Debug, Clone)]
pub struct StoredPattern {
    pub id: Uuid,
    pub owner_id: String,
    pub filename: String,
    pub original_name: String,
    pub pattern_type: String,
    pub confidence: f64,
    pub row_count: i64,
    pub numeric_value_count: i64,
    pub summary_min: Option<f64>,
    pub summary_max: Option<f64>,
    pub summary_avg: Option<f64>,
    pub created_at: i64,
}

impl StoredPattern {
    pub fn into_record(self) -> Result<PatternRecord, StorageError> {
        let pattern_type = PatternType::from_str(&self.pattern_type)
            .map_err(|message| StorageError::invalid_data_format(&message, Some(self.id)))?;
        Ok(PatternRecord {
            id: self.id,
            owner_id: self.owner_id,
            filename: self.filename,
            original_name: self.original_name,
            pattern_type,
            confidence: self.confidence,
            row_count: self.row_count,
            numeric_value_count: self.numeric_value_count,
            summary: Summary {
                min: self.summary_min,
                max: self.summary_max,
                avg: self.summary_avg,
            },
            created_at: self.created_at,
        })
    }
}

/// SQL `LIMIT` value. Anything beyond `i64::MAX` is as good as no limit.
pub fn limit_to_i64(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}
