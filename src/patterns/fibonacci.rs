use super::strategy::SequenceDetector;
use crate::datamodel::PatternType;

const FIBONACCI_NUMBERS: [f64; 13] = [
    1.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0, 34.0, 55.0, 89.0, 144.0, 233.0,
];
const MIN_VALUES: usize = 5;
const EXAMINED_VALUES: usize = 10;
// Strict: a value exactly 2 away from every reference number does not count.
const MAX_DISTANCE: f64 = 2.0;
const MIN_MATCHES: usize = 4;

/// Close to any of the reference numbers, regardless of position.
pub fn is_close_to_fibonacci_number(value: f64) -> bool {
    FIBONACCI_NUMBERS
        .iter()
        .any(|fibonacci| (value - fibonacci).abs() < MAX_DISTANCE)
}

/// Enough of the first values sit next to small Fibonacci numbers.
#[derive(Debug, Default)]
pub struct FibonacciDetector;

impl SequenceDetector for FibonacciDetector {
    fn name(&self) -> &'static str {
        "fibonacci proximity"
    }

    fn pattern_type(&self) -> PatternType {
        PatternType::Fibonacci
    }

    fn detect(&self, values: &[f64]) -> bool {
        if values.len() < MIN_VALUES {
            return false;
        }
        let matches = values
            .iter()
            .take(EXAMINED_VALUES)
            .filter(|value| is_close_to_fibonacci_number(**value))
            .count();
        matches >= MIN_MATCHES
    }
}
