pub mod classification;
pub mod pattern_record;
pub mod pattern_type;
pub mod row;

pub use classification::{ClassificationResult, Summary};
pub use pattern_record::PatternRecord;
pub use pattern_type::{FALLBACK_CONFIDENCE, PatternMatch, PatternType};
pub use row::Row;
