use crate::datamodel::{ClassificationResult, Row};
use crate::patterns::{ClassificationError, PatternClassifier};
use csv_async::{AsyncReader, AsyncReaderBuilder, StringRecord};
use futures::{StreamExt, io};
use tracing::debug;

/// CSV reader with a header row and a comma delimiter.
///
/// Rows may have more or fewer fields than the header.
pub fn create_csv_reader<R: io::AsyncRead + Unpin + Send>(reader: R) -> AsyncReader<R> {
    AsyncReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .flexible(true)
        .create_reader(reader)
}

/// Pairs each field with its header. Extra fields are named `_<index>`.
///
/// When a header repeats, the last field under that name wins.
pub fn record_to_row(headers: &StringRecord, record: &StringRecord) -> Row {
    record
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let name = headers
                .get(index)
                .map(str::to_string)
                .unwrap_or_else(|| format!("_{}", index));
            (name, value)
        })
        .collect()
}

/// Streams the records of a CSV reader into the classifier.
///
/// Any read error, including in the header row, aborts the classification.
pub async fn classify_csv<R: io::AsyncRead + Unpin + Send>(
    classifier: &PatternClassifier,
    source_name: &str,
    mut csv_reader: AsyncReader<R>,
) -> Result<ClassificationResult, ClassificationError> {
    let headers = csv_reader
        .headers()
        .await
        .map_err(ClassificationError::ingestion)?
        .clone();
    debug!("CSV headers: {:?}", headers);

    let rows = csv_reader
        .records()
        .map(|record| record.map(|record| record_to_row(&headers, &record)));
    classifier.classify_stream(source_name, rows).await
}

pub async fn classify_csv_bytes(
    classifier: &PatternClassifier,
    source_name: &str,
    data: &[u8],
) -> Result<ClassificationResult, ClassificationError> {
    classify_csv(classifier, source_name, create_csv_reader(data)).await
}
