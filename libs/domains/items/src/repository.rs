use async_trait::async_trait;

use crate::error::ItemResult;
use crate::models::{Item, ItemIdCount, ItemPayload};

/// Repository trait for Item persistence
///
/// Mutating operations on a single `id` are atomic conditional
/// operations: the predicate match and the mutation happen in one
/// store round-trip, and `None` reports that nothing matched. Under
/// duplicate `id` values, "the first matching document" means the
/// first in store-native order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a new document and return it as re-read from the store
    async fn insert(&self, payload: ItemPayload) -> ItemResult<Item>;

    /// Get the first document whose `id` field matches
    async fn find_by_item_id(&self, id: i64) -> ItemResult<Option<Item>>;

    /// Get every document in the collection, in store-native order
    async fn list(&self) -> ItemResult<Vec<Item>>;

    /// Atomically replace all fields of the first matching document,
    /// returning the post-image
    async fn replace(&self, id: i64, payload: ItemPayload) -> ItemResult<Option<Item>>;

    /// Atomically remove the first matching document, returning its
    /// prior content
    async fn remove(&self, id: i64) -> ItemResult<Option<Item>>;

    /// Group documents by `id` with per-group counts, sorted by count
    /// descending
    async fn counts_by_item_id(&self) -> ItemResult<Vec<ItemIdCount>>;
}
