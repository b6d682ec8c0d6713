//! SQLite persistence (infrastructure).

pub mod database;
mod error;
pub mod repository;
pub mod result;

pub use database::Database;
pub use error::StorageError;
pub use repository::{ClaimRepository, FoodListingRepository, ProviderRepository, ReceiverRepository};
pub use result::{QueryResult, Row};
