//! Domain error types for Foodshare.
//!
//! These cover selection mistakes made before any statement reaches the
//! store. Storage failures are reported separately as
//! [`crate::infra::db::StorageError`].

use thiserror::Error;

/// Errors raised while picking an analytical query from the catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown analysis query: {0}")]
    UnknownQuery(String),
}

/// Errors raised while choosing what to browse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExploreError {
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Location filter is only available for Food_Listings, not {0}")]
    LocationFilterUnsupported(String),
}
