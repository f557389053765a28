//! MongoDB implementation of ItemRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc},
    options::{FindOneAndReplaceOptions, ReturnDocument},
};
use tracing::instrument;

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemDocument, ItemIdCount, ItemPayload};
use crate::repository::ItemRepository;

/// MongoDB implementation of the ItemRepository
pub struct MongoItemRepository {
    collection: Collection<ItemDocument>,
}

impl MongoItemRepository {
    /// Create a new MongoItemRepository
    ///
    /// # Arguments
    /// * `db` - MongoDB database instance
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("mydb");
    /// let repo = MongoItemRepository::new(db);
    /// ```
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<ItemDocument>("items");
        Self { collection }
    }

    /// Create a new MongoItemRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<ItemDocument>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<ItemDocument> {
        &self.collection
    }

    /// Create the index backing the by-`id` lookups.
    ///
    /// Deliberately non-unique: duplicate business ids are allowed.
    pub async fn create_indexes(&self) -> ItemResult<()> {
        use mongodb::IndexModel;

        let index = IndexModel::builder().keys(doc! { "id": 1 }).build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    /// The fixed id-frequency pipeline: group by the business `id`,
    /// count each group, sort by count descending. Tie order is left
    /// to the server.
    fn aggregation_pipeline() -> Vec<Document> {
        vec![
            doc! { "$group": { "_id": "$id", "total_count": { "$sum": 1 } } },
            doc! { "$sort": { "total_count": -1 } },
        ]
    }

    /// A document read back from the store always carries an `_id`;
    /// its absence means the stored data is corrupt.
    fn to_api(document: ItemDocument) -> ItemResult<Item> {
        document
            .into_item()
            .ok_or_else(|| ItemError::Internal("stored document is missing its _id".to_string()))
    }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    #[instrument(skip(self, payload), fields(item_id = payload.id))]
    async fn insert(&self, payload: ItemPayload) -> ItemResult<Item> {
        let document = payload.into_document();

        let result = self.collection.insert_one(&document).await?;

        // Return what the store actually holds, including the
        // server-assigned _id
        let read_back = self
            .collection
            .find_one(doc! { "_id": result.inserted_id })
            .await?
            .ok_or(ItemError::MissingAfterInsert)?;

        tracing::info!(item_id = read_back.id, "Item created successfully");
        Self::to_api(read_back)
    }

    #[instrument(skip(self))]
    async fn find_by_item_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let document = self.collection.find_one(doc! { "id": id }).await?;
        document.map(Self::to_api).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ItemResult<Vec<Item>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<ItemDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Self::to_api).collect()
    }

    #[instrument(skip(self, payload))]
    async fn replace(&self, id: i64, payload: ItemPayload) -> ItemResult<Option<Item>> {
        // One atomic round-trip: match, overwrite all fields, return the
        // post-image. The replacement omits _id, so the stored identifier
        // survives the overwrite.
        let options = FindOneAndReplaceOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let replaced = self
            .collection
            .find_one_and_replace(doc! { "id": id }, payload.into_document())
            .with_options(options)
            .await?;

        if replaced.is_some() {
            tracing::info!(item_id = id, "Item updated successfully");
        }
        replaced.map(Self::to_api).transpose()
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: i64) -> ItemResult<Option<Item>> {
        // Atomic fetch-and-remove; the returned document is the prior
        // content
        let removed = self
            .collection
            .find_one_and_delete(doc! { "id": id })
            .await?;

        if removed.is_some() {
            tracing::info!(item_id = id, "Item deleted successfully");
        }
        removed.map(Self::to_api).transpose()
    }

    #[instrument(skip(self))]
    async fn counts_by_item_id(&self) -> ItemResult<Vec<ItemIdCount>> {
        let cursor = self
            .collection
            .aggregate(Self::aggregation_pipeline())
            .with_type::<ItemIdCount>()
            .await?;

        let counts: Vec<ItemIdCount> = cursor.try_collect().await?;
        Ok(counts)
    }
}
