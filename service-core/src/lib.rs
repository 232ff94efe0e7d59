//! service-core: Shared infrastructure for the campus-health microservices.
pub mod config;
pub mod error;
pub mod observability;

pub use axum;
pub use mongodb;
pub use serde_json;
pub use tracing;
