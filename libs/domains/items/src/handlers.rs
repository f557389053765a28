use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use axum_helpers::{
    AppJson, IdPath,
    errors::responses::{BadRequestIdResponse, InternalServerErrorResponse, NotFoundResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ItemResult;
use crate::models::{Item, ItemIdCount, ItemPayload};
use crate::repository::ItemRepository;
use crate::service::ItemService;

/// OpenAPI documentation for the Items API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, create_item, get_item, update_item, delete_item),
    components(
        schemas(Item, ItemPayload),
        responses(
            NotFoundResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Item management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// OpenAPI documentation for the aggregation endpoint
#[derive(OpenApi)]
#[openapi(
    paths(aggregate_items),
    components(
        schemas(ItemIdCount),
        responses(InternalServerErrorResponse)
    ),
    tags(
        (name = "Items")
    )
)]
pub struct AggregateApiDoc;

/// Create the items router with all CRUD endpoints
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
        .with_state(shared_service)
}

/// Create the router for the id-frequency aggregation endpoint
pub fn aggregate_router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(aggregate_items))
        .with_state(shared_service)
}

/// List all items
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    responses(
        (status = 200, description = "All items in the collection", body = Vec<Item>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
) -> ItemResult<Json<Vec<Item>>> {
    let items = service.list_items().await?;
    Ok(Json(items))
}

/// Create a new item
///
/// No uniqueness check on `id`; posting the same `id` twice stores two
/// documents.
#[utoipa::path(
    post,
    path = "",
    tag = "Items",
    request_body = ItemPayload,
    responses(
        (status = 200, description = "Item created and read back from the store", body = Item),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    AppJson(payload): AppJson<ItemPayload>,
) -> ItemResult<Json<Item>> {
    let item = service.create_item(payload).await?;
    Ok(Json(item))
}

/// Get an item by its business id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Business id of the item")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    IdPath(id): IdPath,
) -> ItemResult<Json<Item>> {
    let item = service.get_item(id).await?;
    Ok(Json(item))
}

/// Replace an item
///
/// Overwrites all fields of the first document matching `id`; the
/// store-assigned `_id` is preserved.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Business id of the item")
    ),
    request_body = ItemPayload,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    IdPath(id): IdPath,
    AppJson(payload): AppJson<ItemPayload>,
) -> ItemResult<Json<Item>> {
    let item = service.update_item(id, payload).await?;
    Ok(Json(item))
}

/// Delete an item
///
/// Responds with the deleted item's prior content.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Business id of the item")
    ),
    responses(
        (status = 200, description = "Item deleted; body is the prior content", body = Item),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    IdPath(id): IdPath,
) -> ItemResult<Json<Item>> {
    let item = service.delete_item(id).await?;
    Ok(Json(item))
}

/// Per-id document counts
///
/// Groups all documents by their business `id` and reports how many
/// documents share each value, sorted by count descending. Ties may
/// appear in any order.
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    responses(
        (status = 200, description = "Per-id counts, most frequent first", body = Vec<ItemIdCount>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn aggregate_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
) -> ItemResult<Json<Vec<ItemIdCount>>> {
    let groups = service.aggregate_items().await?;
    Ok(Json(groups))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ItemError;
    use crate::repository::MockItemRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    fn item(document_id: &str, id: i64, name: &str, description: &str) -> Item {
        Item {
            document_id: document_id.to_string(),
            id,
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    fn items_app(repo: MockItemRepository) -> Router {
        router(ItemService::new(repo))
    }

    async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_200_with_store_identifier() {
        let mut repo = MockItemRepository::new();
        repo.expect_insert()
            .returning(|p| Ok(item("65f0a1b2c3d4e5f6a7b8c9d0", p.id, &p.name, &p.description)));

        let response = items_app(repo)
            .oneshot(json_request(
                "POST",
                "/",
                json!({"id": 1, "name": "a", "description": "x"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = json_body(response.into_body()).await;
        assert_eq!(body["_id"], "65f0a1b2c3d4e5f6a7b8c9d0");
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "a");
    }

    #[tokio::test]
    async fn test_create_with_missing_field_is_rejected() {
        let repo = MockItemRepository::new();

        let response = items_app(repo)
            .oneshot(json_request("POST", "/", json!({"id": 1, "name": "a"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_create_surfaces_missing_read_back_as_404() {
        let mut repo = MockItemRepository::new();
        repo.expect_insert()
            .returning(|_| Err(ItemError::MissingAfterInsert));

        let response = items_app(repo)
            .oneshot(json_request(
                "POST",
                "/",
                json!({"id": 1, "name": "a", "description": "x"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_found_returns_item() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_by_item_id()
            .withf(|id| *id == 42)
            .returning(|id| Ok(Some(item("65f0a1b2c3d4e5f6a7b8c9d0", id, "n", "d"))));

        let response = items_app(repo)
            .oneshot(Request::builder().uri("/42").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Item = json_body(response.into_body()).await;
        assert_eq!(body.id, 42);
    }

    #[tokio::test]
    async fn test_get_missing_returns_404_with_error_kind() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_by_item_id().returning(|_| Ok(None));

        let response = items_app(repo)
            .oneshot(Request::builder().uri("/42").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_get_with_non_integer_id_is_400() {
        let repo = MockItemRepository::new();

        let response = items_app(repo)
            .oneshot(Request::builder().uri("/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_returns_every_item() {
        let mut repo = MockItemRepository::new();
        repo.expect_list().returning(|| {
            Ok(vec![
                item("65f0a1b2c3d4e5f6a7b8c9d0", 1, "a", "x"),
                item("65f0a1b2c3d4e5f6a7b8c9d1", 1, "b", "y"),
            ])
        });

        let response = items_app(repo)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Vec<Item> = json_body(response.into_body()).await;
        assert_eq!(body.len(), 2);
        // Duplicate business ids are allowed
        assert_eq!(body[0].id, body[1].id);
    }

    #[tokio::test]
    async fn test_update_returns_new_values() {
        let mut repo = MockItemRepository::new();
        repo.expect_replace()
            .withf(|id, p| *id == 7 && p.name == "b")
            .returning(|id, p| {
                Ok(Some(item(
                    "65f0a1b2c3d4e5f6a7b8c9d0",
                    id,
                    &p.name,
                    &p.description,
                )))
            });

        let response = items_app(repo)
            .oneshot(json_request(
                "PUT",
                "/7",
                json!({"id": 7, "name": "b", "description": "y"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Item = json_body(response.into_body()).await;
        assert_eq!(body.name, "b");
        assert_eq!(body.description, "y");
    }

    #[tokio::test]
    async fn test_update_missing_returns_404() {
        let mut repo = MockItemRepository::new();
        repo.expect_replace().returning(|_, _| Ok(None));

        let response = items_app(repo)
            .oneshot(json_request(
                "PUT",
                "/7",
                json!({"id": 7, "name": "b", "description": "y"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_returns_prior_content() {
        let mut repo = MockItemRepository::new();
        repo.expect_remove()
            .withf(|id| *id == 5)
            .returning(|id| Ok(Some(item("65f0a1b2c3d4e5f6a7b8c9d0", id, "old", "gone"))));

        let response = items_app(repo)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Item = json_body(response.into_body()).await;
        assert_eq!(body.name, "old");
    }

    #[tokio::test]
    async fn test_delete_missing_returns_404() {
        let mut repo = MockItemRepository::new();
        repo.expect_remove().returning(|_| Ok(None));

        let response = items_app(repo)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_aggregate_reports_groups_most_frequent_first() {
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

        let response = aggregate_router(ItemService::new(repo))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = json_body(response.into_body()).await;
        assert_eq!(body[0]["_id"], 1);
        assert_eq!(body[0]["total_count"], 2);
        assert_eq!(body[1]["total_count"], 1);
    }

    #[tokio::test]
    async fn test_aggregate_fault_is_500() {
        let mut repo = MockItemRepository::new();
        repo.expect_counts_by_item_id()
            .returning(|| Err(ItemError::Database("cursor failed".to_string())));

        let response = aggregate_router(ItemService::new(repo))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
