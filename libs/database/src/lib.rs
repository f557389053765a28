//! Database library providing the MongoDB connector and shared utilities
//!
//! The `mongodb` feature (default) pulls in the driver and the connector;
//! the `config` feature adds `core_config::FromEnv` loading for
//! [`mongodb::MongoConfig`].
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//! let collection = db.collection::<Document>("items");
//! ```

// Always available modules
pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

// Re-exports for convenience
pub use common::{DatabaseError, DatabaseResult};
