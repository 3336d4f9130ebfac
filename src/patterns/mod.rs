pub mod classifier;
pub mod column_selector;
pub mod error;
pub mod exponential;
pub mod fibonacci;
pub mod filename_hint;
pub mod numeric_columns;
pub mod parsing;
pub mod sine_wave;
pub mod strategy;
pub mod summary;

pub use classifier::PatternClassifier;
pub use error::ClassificationError;
pub use numeric_columns::NumericColumns;
