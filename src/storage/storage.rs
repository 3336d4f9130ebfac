use crate::datamodel::PatternRecord;
use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;
use uuid::Uuid;

#[async_trait]
pub trait StorageInstance: Send + Sync + Debug {
    async fn create_or_migrate(&self) -> Result<()>;

    /// Cheap round trip to the database, for readiness probes.
    async fn health_check(&self) -> Result<()>;

    async fn save_pattern(&self, record: &PatternRecord) -> Result<()>;

    async fn get_pattern(&self, id: Uuid) -> Result<Option<PatternRecord>>;

    /// Most recent records of an owner first.
    async fn list_patterns(&self, owner_id: &str, limit: usize) -> Result<Vec<PatternRecord>>;
}
