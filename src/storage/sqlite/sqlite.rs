use crate::datamodel::PatternRecord;
use crate::storage::common::{StoredPattern, limit_to_i64};
use crate::storage::{StorageError, StorageInstance};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

const SELECT_PATTERNS: &str = r#"
    SELECT id, owner_id, filename, original_name, pattern_type, confidence,
           row_count, numeric_value_count, summary_min, summary_max, summary_avg,
           created_at
    FROM patterns
"#;

// SQLite implementation
#[derive(Debug)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub async fn connect(connection_string: &str) -> Result<Self> {
        let connect_options = SqliteConnectOptions::from_str(connection_string)
            .context("Failed to create sqlite connection options")?
            // Create the database file if it doesn't exist
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            // Set a busy timeout of 5 seconds
            .busy_timeout(Duration::from_secs(5));

        // Every connection to an in-memory database gets its own database,
        // so the pool must hold a single connection that is never recycled.
        let pool_options = if connection_string.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .context("Failed to create sqlite pool")?;

        Ok(Self { pool })
    }
}

fn stored_pattern_from_row(row: &SqliteRow) -> Result<StoredPattern, StorageError> {
    let id: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id)
        .map_err(|_| StorageError::invalid_data_format("Failed to parse pattern UUID", None))?;
    Ok(StoredPattern {
        id,
        owner_id: row.try_get("owner_id")?,
        filename: row.try_get("filename")?,
        original_name: row.try_get("original_name")?,
        pattern_type: row.try_get("pattern_type")?,
        confidence: row.try_get("confidence")?,
        row_count: row.try_get("row_count")?,
        numeric_value_count: row.try_get("numeric_value_count")?,
        summary_min: row.try_get("summary_min")?,
        summary_max: row.try_get("summary_max")?,
        summary_avg: row.try_get("summary_avg")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl StorageInstance for SqliteStorage {
    async fn create_or_migrate(&self) -> Result<()> {
        sqlx::migrate!("src/storage/sqlite/migrations")
            .run(&self.pool)
            .await
            .context("Failed to migrate database")?;

        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("SQLite health check failed")?;
        Ok(())
    }

    async fn save_pattern(&self, record: &PatternRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO patterns (
                id, owner_id, filename, original_name, pattern_type, confidence,
                row_count, numeric_value_count, summary_min, summary_max, summary_avg,
                created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.owner_id)
        .bind(&record.filename)
        .bind(&record.original_name)
        .bind(record.pattern_type.as_str())
        .bind(record.confidence)
        .bind(record.row_count)
        .bind(record.numeric_value_count)
        .bind(record.summary.min)
        .bind(record.summary.max)
        .bind(record.summary.avg)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert pattern")?;
        Ok(())
    }

    async fn get_pattern(&self, id: Uuid) -> Result<Option<PatternRecord>> {
        let query = format!("{} WHERE id = ?", SELECT_PATTERNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(stored_pattern_from_row(&row)?.into_record()?)),
            None => Ok(None),
        }
    }

    async fn list_patterns(&self, owner_id: &str, limit: usize) -> Result<Vec<PatternRecord>> {
        let query = format!(
            "{} WHERE owner_id = ? ORDER BY created_at DESC, rowid DESC LIMIT ?",
            SELECT_PATTERNS
        );
        let rows = sqlx::query(&query)
            .bind(owner_id)
            .bind(limit_to_i64(limit))
            .fetch_all(&self.pool)
            .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(stored_pattern_from_row(&row)?.into_record()?);
        }
        Ok(records)
    }
}
