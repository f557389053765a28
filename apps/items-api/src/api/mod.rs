//! API routes module
//!
//! Wires domain routers and the readiness endpoint into one router.
//! Route paths here are the public contract: /items and /aggregate at
//! the root.

pub mod health;
pub mod items;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/items", items::router(state))
        .nest("/aggregate", items::aggregate_router(state))
        .merge(health::router(state.clone()))
}
