pub mod database;
pub mod formatter;
pub mod jwt;
pub mod prompt;
pub mod providers;

pub use database::{AssistantDb, RecordStore};
pub use jwt::{AccessTokenClaims, JwtService};
