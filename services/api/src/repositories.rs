//! Repositories for database operations
//!
//! [`Repository`] is the store contract every handler talks to. It is
//! implemented by [`postgres::PgStore`] for every entity and by
//! [`memory::MemoryRepository`] for an in-process store.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::DatabaseResult;

pub mod memory;
pub mod postgres;

/// A persisted entity with a caller-supplied identifier
pub trait Record: Clone + Send + Sync + 'static {
    /// Listing / lookup criteria
    type Filter: Default + Send + Sync;
    /// Partial update payload; `None` fields keep their stored value
    type Changes: Send + Sync;

    fn id(&self) -> &str;

    /// Whether the two records collide on any unique key
    fn conflicts_with(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Order in which listings are returned
    fn listing_order(&self, other: &Self) -> Ordering;

    /// Apply a partial update, stamping `now` as the update time
    fn apply(&mut self, changes: &Self::Changes, now: DateTime<Utc>);
}

/// Store operations available for a record type
#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
    /// All records matching `filter`, in listing order
    async fn list(&self, filter: &R::Filter) -> DatabaseResult<Vec<R>>;

    /// The record with this identifier, if any
    async fn find(&self, id: &str) -> DatabaseResult<Option<R>>;

    /// First record matching `filter`, if any
    async fn find_first(&self, filter: &R::Filter) -> DatabaseResult<Option<R>>;

    /// Insert a new record; fails with `AlreadyExists` on a unique key collision
    async fn create(&self, record: &R) -> DatabaseResult<R>;

    /// Update a record in place; fails with `NotFound` when the id is unknown
    async fn update(&self, id: &str, changes: &R::Changes) -> DatabaseResult<R>;

    /// Hard delete; fails with `NotFound` when the id is unknown
    async fn delete(&self, id: &str) -> DatabaseResult<()>;
}
