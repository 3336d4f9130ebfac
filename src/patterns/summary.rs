use super::numeric_columns::NumericColumns;
use crate::datamodel::Summary;

/// Min, max and mean of a series. An empty series gives an empty summary.
pub fn summarize(values: &[f64]) -> Summary {
    if values.is_empty() {
        return Summary::empty();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let sum: f64 = values.iter().sum();
    // Rounding can push the mean of identical values slightly outside [min, max].
    let avg = (sum / values.len() as f64).clamp(min, max);
    Summary {
        min: Some(min),
        max: Some(max),
        avg: Some(avg),
    }
}

/// Summary of the first numeric column, with the number of values it holds.
///
/// This is not necessarily the column the detectors looked at.
pub fn summarize_first_column(columns: &NumericColumns) -> (Summary, usize) {
    match columns.first() {
        Some((_, values)) => (summarize(values), values.len()),
        None => (Summary::empty(), 0),
    }
}
