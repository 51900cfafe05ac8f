//! In-process store
//!
//! Mirrors the PostgreSQL adapter: unique keys are enforced on create and
//! update, listings follow each record's ordering and updates stamp the
//! update time. Records are kept in insertion order.

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use tokio::sync::RwLock;

use super::{Record, Repository};

/// In-memory repository for a single record type
pub struct MemoryRepository<R> {
    records: RwLock<Vec<R>>,
}

impl<R> MemoryRepository<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<R> Default for MemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> Repository<R> for MemoryRepository<R> {
    async fn list(&self, filter: &R::Filter) -> DatabaseResult<Vec<R>> {
        let records = self.records.read().await;
        let mut matching: Vec<R> = records
            .iter()
            .filter(|record| record.matches(filter))
            .cloned()
            .collect();
        matching.sort_by(R::listing_order);
        Ok(matching)
    }

    async fn find(&self, id: &str) -> DatabaseResult<Option<R>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|record| record.id() == id).cloned())
    }

    async fn find_first(&self, filter: &R::Filter) -> DatabaseResult<Option<R>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|record| record.matches(filter)).cloned())
    }

    async fn create(&self, record: &R) -> DatabaseResult<R> {
        let mut records = self.records.write().await;
        if records.iter().any(|existing| existing.conflicts_with(record)) {
            return Err(DatabaseError::AlreadyExists);
        }

        records.push(record.clone());
        Ok(record.clone())
    }

    async fn update(&self, id: &str, changes: &R::Changes) -> DatabaseResult<R> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or(DatabaseError::NotFound)?;

        let mut updated = records[index].clone();
        updated.apply(changes, Utc::now());

        let collides = records
            .iter()
            .enumerate()
            .any(|(other, existing)| other != index && existing.conflicts_with(&updated));
        if collides {
            return Err(DatabaseError::AlreadyExists);
        }

        records[index] = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> DatabaseResult<()> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| record.id() != id);

        if records.len() == before {
            return Err(DatabaseError::NotFound);
        }
        Ok(())
    }
}
