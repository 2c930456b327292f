//! Keyed persistence for blog posts.
//!
//! Two backends implement [`PostStore`]: [`MemoryPostStore`] for development
//! and tests, and [`PgPostStore`] backed by Postgres.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::{
    models::{BlogPost, NewPost, PostChanges, PostFilter},
    Result,
};

pub use memory::MemoryPostStore;
pub use postgres::PgPostStore;

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Assigns the next unused id and persists the record.
    ///
    /// Fails with `Error::Validation` if a column constraint is violated; the
    /// store is left unchanged in that case.
    async fn insert(&self, post: NewPost) -> Result<BlogPost>;

    async fn find_by_id(&self, id: i64) -> Result<Option<BlogPost>>;

    /// Records matching `filter`, in no particular order.
    async fn find_all(&self, filter: PostFilter) -> Result<Vec<BlogPost>>;

    /// Overwrites every mutable field of the record `id`.
    ///
    /// Fails with `Error::NotFound` if the record is absent. The stored
    /// `updated_date` is never earlier than `created_date`.
    async fn replace(&self, id: i64, changes: PostChanges) -> Result<BlogPost>;

    async fn remove(&self, id: i64) -> Result<bool>;

    async fn count(&self) -> Result<usize>;
}
