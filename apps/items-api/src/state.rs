//! Application state management.
//!
//! Shared state passed to all request handlers: configuration plus the
//! MongoDB client and database handles.

use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloned per handler; the MongoDB client is an Arc around the driver's
/// connection pool, so clones are cheap.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
}
