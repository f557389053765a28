//! Item Service - orchestration layer
//!
//! Converts the repository's `Option` results into typed not-found
//! errors; the HTTP layer above only ever sees `ItemResult`.

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemIdCount, ItemPayload};
use crate::repository::ItemRepository;

/// Item service providing the operations behind the HTTP endpoints
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a new ItemService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new item.
    ///
    /// No duplicate check on `id`: creating the same `id` twice stores
    /// two documents.
    #[instrument(skip(self, payload), fields(item_id = payload.id))]
    pub async fn create_item(&self, payload: ItemPayload) -> ItemResult<Item> {
        self.repository.insert(payload).await
    }

    /// Get the first item with the given `id`
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: i64) -> ItemResult<Item> {
        self.repository
            .find_by_item_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    /// List every item in the collection
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.list().await
    }

    /// Replace all fields of the first item with the given `id`
    #[instrument(skip(self, payload))]
    pub async fn update_item(&self, id: i64, payload: ItemPayload) -> ItemResult<Item> {
        self.repository
            .replace(id, payload)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    /// Delete the first item with the given `id`, returning its prior
    /// content
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i64) -> ItemResult<Item> {
        self.repository
            .remove(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    /// Per-`id` document counts, sorted by count descending
    #[instrument(skip(self))]
    pub async fn aggregate_items(&self) -> ItemResult<Vec<ItemIdCount>> {
        self.repository.counts_by_item_id().await
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockItemRepository;

    fn item(document_id: &str, id: i64, name: &str, description: &str) -> Item {
        Item {
            document_id: document_id.to_string(),
            id,
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    fn payload(id: i64, name: &str, description: &str) -> ItemPayload {
        ItemPayload {
            id,
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_returns_stored_item() {
        let mut repo = MockItemRepository::new();
        repo.expect_insert()
            .withf(|p| p.id == 1 && p.name == "a")
            .returning(|p| Ok(item("65f0a1b2c3d4e5f6a7b8c9d0", p.id, &p.name, &p.description)));

        let service = ItemService::new(repo);
        let created = service.create_item(payload(1, "a", "x")).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.document_id, "65f0a1b2c3d4e5f6a7b8c9d0");
    }

    #[tokio::test]
    async fn test_get_found() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_by_item_id()
            .withf(|id| *id == 7)
            .returning(|id| Ok(Some(item("65f0a1b2c3d4e5f6a7b8c9d0", id, "n", "d"))));

        let service = ItemService::new(repo);
        let found = service.get_item(7).await.unwrap();
        assert_eq!(found.id, 7);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_by_item_id().returning(|_| Ok(None));

        let service = ItemService::new(repo);
        let err = service.get_item(7).await.unwrap_err();
        assert!(matches!(err, ItemError::NotFound(7)));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let mut repo = MockItemRepository::new();
        repo.expect_replace().returning(|_, _| Ok(None));

        let service = ItemService::new(repo);
        let err = service
            .update_item(7, payload(7, "new", "values"))
            .await
            .unwrap_err();
        assert!(matches!(err, ItemError::NotFound(7)));
    }

    #[tokio::test]
    async fn test_update_returns_post_image() {
        let mut repo = MockItemRepository::new();
        repo.expect_replace()
            .withf(|id, p| *id == 3 && p.name == "new")
            .returning(|id, p| {
                Ok(Some(item(
                    "65f0a1b2c3d4e5f6a7b8c9d0",
                    id,
                    &p.name,
                    &p.description,
                )))
            });

        let service = ItemService::new(repo);
        let updated = service.update_item(3, payload(3, "new", "desc")).await.unwrap();
        assert_eq!(updated.name, "new");
    }

    #[tokio::test]
    async fn test_delete_returns_prior_content() {
        let mut repo = MockItemRepository::new();
        repo.expect_remove()
            .returning(|id| Ok(Some(item("65f0a1b2c3d4e5f6a7b8c9d0", id, "old", "gone"))));

        let service = ItemService::new(repo);
        let deleted = service.delete_item(5).await.unwrap();
        assert_eq!(deleted.name, "old");
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut repo = MockItemRepository::new();
        repo.expect_remove().returning(|_| Ok(None));

        let service = ItemService::new(repo);
        let err = service.delete_item(5).await.unwrap_err();
        assert!(matches!(err, ItemError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_aggregate_passes_groups_through() {
        let mut repo = MockItemRepository::new();
        repo.expect_counts_by_item_id().returning(|| {
            Ok(vec![
                ItemIdCount {
                    id: 1,
                    total_count: 2,
                },
                ItemIdCount {
                    id: 9,
                    total_count: 1,
                },
            ])
        });

        let service = ItemService::new(repo);
        let groups = service.aggregate_items().await.unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].total_count, 2);
    }

    #[tokio::test]
    async fn test_database_faults_propagate() {
        let mut repo = MockItemRepository::new();
        repo.expect_list()
            .returning(|| Err(ItemError::Database("connection reset".to_string())));

        let service = ItemService::new(repo);
        let err = service.list_items().await.unwrap_err();
        assert!(matches!(err, ItemError::Database(_)));
    }
}
