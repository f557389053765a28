use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Item as stored in MongoDB.
///
/// `document_id` is the store-assigned `_id`; it is `None` until the
/// document has been inserted, and omitting it on serialization lets
/// the server assign one on insert and keeps replace operations from
/// touching it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub document_id: Option<ObjectId>,
    /// Business key. Not unique: two creates with the same `id` store
    /// two distinct documents.
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Item as exposed over the API.
///
/// Carries the store-assigned identifier on every response, rendered as
/// a 24-character hex string under `_id`. The identifier is immutable
/// for the lifetime of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Store-assigned identifier (hex), distinct from the business `id`
    #[serde(rename = "_id")]
    #[schema(example = "65f0a1b2c3d4e5f6a7b8c9d0")]
    pub document_id: String,
    /// Business key
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Request payload for creating or fully replacing an item.
///
/// All fields are required; deserialization enforces presence and type.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemPayload {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// One group from the id-frequency aggregation.
///
/// `_id` here is the aggregation group key, i.e. the business `id`
/// shared by `total_count` documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemIdCount {
    /// Group key: the business `id`
    #[serde(rename = "_id")]
    pub id: i64,
    /// Number of documents sharing this `id`
    pub total_count: i64,
}

impl ItemPayload {
    /// Build the document to store, leaving `_id` assignment to MongoDB
    pub fn into_document(self) -> ItemDocument {
        ItemDocument {
            document_id: None,
            id: self.id,
            name: self.name,
            description: self.description,
        }
    }
}

impl ItemDocument {
    /// Convert to the API representation.
    ///
    /// Returns `None` when the document has no `_id`, which can only
    /// happen for a document that never went through the store.
    pub fn into_item(self) -> Option<Item> {
        let document_id = self.document_id?;
        Some(Item {
            document_id: document_id.to_hex(),
            id: self.id,
            name: self.name,
            description: self.description,
        })
    }
}
