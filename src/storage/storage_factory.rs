use std::sync::Arc;

use anyhow::{Result, bail};

use super::StorageInstance;

#[cfg(feature = "postgres")]
use super::postgresql::PostgresStorage;

#[cfg(feature = "sqlite")]
use super::sqlite::SqliteStorage;

pub async fn create_storage_from_connection_string(
    connection_string: &str,
) -> Result<Arc<dyn StorageInstance>> {
    Ok(match connection_string {
        #[cfg(feature = "postgres")]
        s if s.starts_with("postgres:") => Arc::new(PostgresStorage::connect(s).await?),

        #[cfg(feature = "sqlite")]
        s if s.starts_with("sqlite:") => Arc::new(SqliteStorage::connect(s).await?),

        // Provide helpful error messages for disabled backends
        #[cfg(not(feature = "postgres"))]
        s if s.starts_with("postgres:") => {
            bail!("PostgreSQL storage backend is not enabled. Enable with --features postgres")
        }

        #[cfg(not(feature = "sqlite"))]
        s if s.starts_with("sqlite:") => {
            bail!("SQLite storage backend is not enabled. Enable with --features sqlite")
        }

        _ => bail!("Unsupported storage type: {}", connection_string),
    })
}
