//! Items API routes
//!
//! Wires the items domain to its HTTP mount points.

use axum::Router;
use domain_items::{ItemService, MongoItemRepository};
use tracing::info;

use crate::state::AppState;

fn service(state: &AppState) -> ItemService<MongoItemRepository> {
    let repository = MongoItemRepository::new(state.db.clone());
    ItemService::new(repository)
}

/// Create the /items router
pub fn router(state: &AppState) -> Router {
    domain_items::handlers::router(service(state))
}

/// Create the /aggregate router
pub fn aggregate_router(state: &AppState) -> Router {
    domain_items::handlers::aggregate_router(service(state))
}

/// Initialize item collection indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    let repository = MongoItemRepository::new(db.clone());
    repository
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create item indexes: {}", e))?;
    info!("Item collection indexes created");
    Ok(())
}
