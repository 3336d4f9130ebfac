//! Test utilities for PatternCraft tests
//!
//! Storage and request helpers shared by unit and integration tests.

use crate::storage::{StorageInstance, storage_factory::create_storage_from_connection_string};
use anyhow::{Result, anyhow};
use std::sync::Arc;

/// Default connection string for tests: a private in-memory database.
const DEFAULT_TEST_DATABASE_URL: &str = "sqlite::memory:";

/// Get the test database connection string from `TEST_DATABASE_URL` or use
/// an in-memory SQLite database.
pub fn get_test_database_url() -> String {
    std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| DEFAULT_TEST_DATABASE_URL.to_string())
}

/// Connects to the test database and runs the migrations.
pub async fn create_test_storage() -> Result<Arc<dyn StorageInstance>> {
    let connection_string = get_test_database_url();
    let storage = create_storage_from_connection_string(&connection_string)
        .await
        .map_err(|e| anyhow!("Failed to create storage for {}: {}", connection_string, e))?;
    storage
        .create_or_migrate()
        .await
        .map_err(|e| anyhow!("Failed to run migrations for {}: {}", connection_string, e))?;
    Ok(storage)
}

pub const MULTIPART_BOUNDARY: &str = "patterncraft-test-boundary";

/// A `multipart/form-data` body holding a single file field.
pub fn multipart_file_body(
    field_name: &str,
    file_name: &str,
    content_type: &str,
    content: &[u8],
) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field_name, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}

/// `Content-Type` header value matching [`multipart_file_body`].
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY)
}
