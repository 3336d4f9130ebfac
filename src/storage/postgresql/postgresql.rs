use crate::datamodel::PatternRecord;
use crate::storage::common::{StoredPattern, limit_to_i64};
use crate::storage::{StorageError, StorageInstance};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgRow};
use sqlx::{PgPool, Row};
use std::str::FromStr;
use uuid::Uuid;

const SELECT_PATTERNS: &str = r#"
    SELECT id, owner_id, filename, original_name, pattern_type, confidence,
           row_count, numeric_value_count, summary_min, summary_max, summary_avg,
           created_at
    FROM patterns
"#;

#[derive(Debug)]
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    pub async fn connect(connection_string: &str) -> Result<Self> {
        let connect_options = PgConnectOptions::from_str(connection_string)
            .context("Failed to create postgres connection options")?;

        let pool = PgPool::connect_with(connect_options)
            .await
            .context("Failed to create postgres pool")?;

        Ok(Self { pool })
    }
}

fn stored_pattern_from_row(row: &PgRow) -> Result<StoredPattern, StorageError> {
    Ok(StoredPattern {
        id: row.try_get("id")?,
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
impl StorageInstance for PostgresStorage {
    async fn create_or_migrate(&self) -> Result<()> {
        sqlx::migrate!("src/storage/postgresql/migrations")
            .run(&self.pool)
            .await
            .context("Failed to migrate database")?;
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("PostgreSQL health check failed")?;
        Ok(())
    }

    async fn save_pattern(&self, record: &PatternRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO patterns (
                id, owner_id, filename, original_name, pattern_type, confidence,
                row_count, numeric_value_count, summary_min, summary_max, summary_avg,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(record.id)
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
        let query = format!("{} WHERE id = $1", SELECT_PATTERNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(stored_pattern_from_row(&row)?.into_record()?)),
            None => Ok(None),
        }
    }

    async fn list_patterns(&self, owner_id: &str, limit: usize) -> Result<Vec<PatternRecord>> {
        let query = format!(
            "{} WHERE owner_id = $1 ORDER BY created_at DESC, seq DESC LIMIT $2",
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
