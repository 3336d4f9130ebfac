use super::pattern_type::{PatternMatch, PatternType};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Min, max and mean of one numeric column.
///
/// All three are `None` when the column has no numeric value, which
/// serialises as JSON `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Summary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

impl Summary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassificationResult {
    pub pattern_type: PatternType,
    pub confidence: f64,
    pub row_count: usize,
    pub numeric_value_count: usize,
    pub summary: Summary,
}

impl ClassificationResult {
    pub fn new(
        pattern: Option<PatternMatch>,
        row_count: usize,
        numeric_value_count: usize,
        summary: Summary,
    ) -> Self {
        let pattern = pattern.unwrap_or(PatternMatch::new(PatternType::Unknown));
        Self {
            pattern_type: pattern.pattern_type,
            confidence: pattern.confidence,
            row_count,
            numeric_value_count,
            summary,
        }
    }

    /// Confidence as a rounded percentage, e.g. `"88%"`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.0}%", self.confidence * 100.0)
    }
}
