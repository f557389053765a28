//! Custom axum extractors.

pub mod id_path;
pub mod json_body;

pub use id_path::IdPath;
pub use json_body::AppJson;
