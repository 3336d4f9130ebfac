use super::strategy::SequenceDetector;
use crate::datamodel::PatternType;

const MIN_VALUES: usize = 8;
const MIN_INCREASING_SHARE: f64 = 0.7;
const MIN_GROWING_GAP_SHARE: f64 = 0.3;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GrowthCounts {
    pub increasing: usize,
    pub growing_gaps: usize,
}

/// Walks every inner value, comparing it with its two neighbours.
pub fn count_growth(values: &[f64]) -> GrowthCounts {
    let mut counts = GrowthCounts::default();
    for window in values.windows(3) {
        let (previous, current, next) = (window[0], window[1], window[2]);
        let gap = current - previous;
        let next_gap = next - current;
        if current > previous {
            counts.increasing += 1;
        }
        if next_gap > gap && gap > 0.0 {
            counts.growing_gaps += 1;
        }
    }
    counts
}

/// Mostly increasing values with gaps that keep widening.
#[derive(Debug, Default)]
pub struct ExponentialDetector;

impl SequenceDetector for ExponentialDetector {
    fn name(&self) -> &'static str {
        "exponential growth"
    }

    fn pattern_type(&self) -> PatternType {
        PatternType::Exponential
    }

    fn detect(&self, values: &[f64]) -> bool {
        if values.len() < MIN_VALUES {
            return false;
        }
        let n = values.len() as f64;
        let counts = count_growth(values);
        counts.increasing as f64 > n * MIN_INCREASING_SHARE
            && counts.growing_gaps as f64 > n * MIN_GROWING_GAP_SHARE
    }
}
