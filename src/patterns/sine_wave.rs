use super::strategy::SequenceDetector;
use crate::datamodel::PatternType;

const MIN_VALUES: usize = 30;
// At least one direction change every 10 values.
const VALUES_PER_DIRECTION_CHANGE: usize = 10;

/// Counts sign flips between consecutive first differences.
///
/// A zero difference has no sign: it never takes part in a flip.
pub fn count_direction_changes(values: &[f64]) -> usize {
    values
        .windows(3)
        .filter(|window| {
            let previous = window[1] - window[0];
            let current = window[2] - window[1];
            (previous > 0.0 && current < 0.0) || (previous < 0.0 && current > 0.0)
        })
        .count()
}

/// Oscillating data, like tides or a sampled sine.
#[derive(Debug, Default)]
pub struct SineWaveDetector;

impl SequenceDetector for SineWaveDetector {
    fn name(&self) -> &'static str {
        "oscillation"
    }

    fn pattern_type(&self) -> PatternType {
        PatternType::SineWave
    }

    fn detect(&self, values: &[f64]) -> bool {
        if values.len() < MIN_VALUES {
            return false;
        }
        count_direction_changes(values) >= values.len() / VALUES_PER_DIRECTION_CHANGE
    }
}
