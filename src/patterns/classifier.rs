use super::error::ClassificationError;
use super::exponential::ExponentialDetector;
use super::fibonacci::FibonacciDetector;
use super::filename_hint::FilenameHint;
use super::numeric_columns::NumericColumns;
use super::sine_wave::SineWaveDetector;
use super::strategy::{ClassificationInput, ClassificationStrategy, OnMainColumn};
use super::summary::summarize_first_column;
use crate::datamodel::{ClassificationResult, PatternMatch, Row};
use futures::{Stream, StreamExt};
use tracing::{debug, info};

/// Runs the classification chain over a whole dataset.
///
/// Strategies are tried in order and the first match wins. The default chain
/// is the filename hint, then the fibonacci, oscillation and exponential
/// detectors on the main column.
#[derive(Debug)]
pub struct PatternClassifier {
    strategies: Vec<Box<dyn ClassificationStrategy>>,
}

impl Default for PatternClassifier {
    fn default() -> Self {
        Self::new(vec![
            Box::new(FilenameHint),
            Box::new(OnMainColumn(FibonacciDetector)),
            Box::new(OnMainColumn(SineWaveDetector)),
            Box::new(OnMainColumn(ExponentialDetector)),
        ])
    }
}

impl PatternClassifier {
    pub fn new(strategies: Vec<Box<dyn ClassificationStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|strategy| strategy.name()).collect()
    }

    /// Classifies columns that were already extracted.
    pub fn classify_columns(
        &self,
        source_name: &str,
        columns: &NumericColumns,
    ) -> ClassificationResult {
        info!(
            "Analyzing {}: {} rows, numeric columns {:?}",
            source_name,
            columns.row_count(),
            columns.names().collect::<Vec<_>>()
        );

        let input = ClassificationInput::new(source_name, columns);
        let pattern = self.first_match(&input);
        let (summary, numeric_value_count) = summarize_first_column(columns);
        let result =
            ClassificationResult::new(pattern, columns.row_count(), numeric_value_count, summary);

        info!(
            "Classified {} as {} ({} confidence)",
            source_name,
            result.pattern_type,
            result.confidence_percent()
        );
        result
    }

    pub fn classify_rows<'a, I>(&self, source_name: &str, rows: I) -> ClassificationResult
    where
        I: IntoIterator<Item = &'a Row>,
    {
        self.classify_columns(source_name, &NumericColumns::from_rows(rows))
    }

    /// Buffers a row stream, then classifies it.
    ///
    /// The first error in the stream aborts the whole classification.
    pub async fn classify_stream<S, E>(
        &self,
        source_name: &str,
        rows: S,
    ) -> Result<ClassificationResult, ClassificationError>
    where
        S: Stream<Item = Result<Row, E>>,
        E: Into<anyhow::Error>,
    {
        let mut rows = std::pin::pin!(rows);
        let mut columns = NumericColumns::new();
        while let Some(row) = rows.next().await {
            let row = row.map_err(ClassificationError::ingestion)?;
            columns.push_row(&row);
        }
        Ok(self.classify_columns(source_name, &columns))
    }

    fn first_match(&self, input: &ClassificationInput<'_>) -> Option<PatternMatch> {
        self.strategies.iter().find_map(|strategy| {
            let pattern = strategy.attempt(input);
            match pattern {
                Some(pattern) => debug!("{} matched {}", strategy.name(), pattern.pattern_type),
                None => debug!("{} abstained", strategy.name()),
            }
            pattern
        })
    }
}
