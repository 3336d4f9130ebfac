use super::column_selector::select_main_column;
use super::numeric_columns::NumericColumns;
use crate::datamodel::{PatternMatch, PatternType};
use std::cell::OnceCell;
use std::fmt::Debug;
use tracing::debug;

/// What a classification strategy may look at.
///
/// The main column is only selected the first time a strategy asks for it,
/// so a filename match never pays for column selection.
#[derive(Debug)]
pub struct ClassificationInput<'a> {
    source_name: &'a str,
    columns: &'a NumericColumns,
    main_column: OnceCell<Option<(&'a str, &'a [f64])>>,
}

impl<'a> ClassificationInput<'a> {
    pub fn new(source_name: &'a str, columns: &'a NumericColumns) -> Self {
        Self {
            source_name,
            columns,
            main_column: OnceCell::new(),
        }
    }

    pub fn source_name(&self) -> &'a str {
        self.source_name
    }

    pub fn columns(&self) -> &'a NumericColumns {
        self.columns
    }

    pub fn main_column(&self) -> Option<(&'a str, &'a [f64])> {
        *self.main_column.get_or_init(|| {
            let main_column = select_main_column(self.columns);
            match main_column {
                Some((name, values)) => {
                    debug!("Main column: \"{}\" ({} values)", name, values.len())
                }
                None => debug!("No numeric column to analyse"),
            }
            main_column
        })
    }
}

/// One link of the classification chain.
pub trait ClassificationStrategy: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    /// `None` means the strategy abstains and the next one is tried.
    fn attempt(&self, input: &ClassificationInput<'_>) -> Option<PatternMatch>;
}

/// A detector working on a single sequence of numbers.
pub trait SequenceDetector: Send + Sync + Debug {
    fn name(&self) -> &'static str;
    fn pattern_type(&self) -> PatternType;
    fn detect(&self, values: &[f64]) -> bool;
}

/// Runs a [`SequenceDetector`] against the main column.
#[derive(Debug)]
pub struct OnMainColumn<D>(pub D);

impl<D: SequenceDetector> ClassificationStrategy for OnMainColumn<D> {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn attempt(&self, input: &ClassificationInput<'_>) -> Option<PatternMatch> {
        let (_, values) = input.main_column()?;
        self.0
            .detect(values)
            .then(|| PatternMatch::new(self.0.pattern_type()))
    }
}
