use thiserror::Error;
use uuid::Uuid;

/// Storage-specific errors that can occur during database operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection or query execution error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid data format in database
    #[error("Invalid data format: {message} for pattern {pattern_context}")]
    InvalidDataFormat {
        message: String,
        pattern_context: String,
    },
}

impl StorageError {
    /// Create an invalid data format error with pattern context
    pub fn invalid_data_format(message: &str, pattern_id: Option<Uuid>) -> Self {
        let pattern_context = match pattern_id {
            Some(id) => format!("id={}", id),
            None => "unknown pattern".to_string(),
        };

        StorageError::InvalidDataFormat {
            message: message.to_string(),
            pattern_context,
        }
    }
}
