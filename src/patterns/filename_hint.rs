use super::strategy::{ClassificationInput, ClassificationStrategy};
use crate::datamodel::{PatternMatch, PatternType};

// First matching group wins.
const FILENAME_HINTS: &[(&[&str], PatternType)] = &[
    (&["fibonacci", "spiral"], PatternType::Fibonacci),
    (&["tide", "wave", "ocean"], PatternType::SineWave),
    (&["viral", "growth", "exponential"], PatternType::Exponential),
];

/// Looks for keywords in the lower-cased source name.
pub fn filename_hint(source_name: &str) -> Option<PatternMatch> {
    let lowercase_name = source_name.to_lowercase();
    FILENAME_HINTS
        .iter()
        .find(|(keywords, _)| {
            keywords
                .iter()
                .any(|keyword| lowercase_name.contains(keyword))
        })
        .map(|(_, pattern_type)| PatternMatch::new(*pattern_type))
}

/// Classifies from the file name alone. When it matches, the data is not looked at.
#[derive(Debug, Default)]
pub struct FilenameHint;

impl ClassificationStrategy for FilenameHint {
    fn name(&self) -> &'static str {
        "filename hint"
    }

    fn attempt(&self, input: &ClassificationInput<'_>) -> Option<PatternMatch> {
        filename_hint(input.source_name())
    }
}
