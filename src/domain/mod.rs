//! Domain types for Foodshare
//! Defines the providers, receivers, food listings and claims tracked by the database.

pub mod claim;
pub mod error;
pub mod listing;
pub mod party;

pub use claim::*;
pub use error::*;
pub use listing::*;
pub use party::*;
