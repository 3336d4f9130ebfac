use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassificationError {
    /// The row source failed. Nothing is classified.
    #[error("Failed to read the dataset: {0}")]
    Ingestion(#[source] anyhow::Error),
}

impl ClassificationError {
    pub fn ingestion(error: impl Into<anyhow::Error>) -> Self {
        ClassificationError::Ingestion(error.into())
    }
}
