//! Repository implementations for data access in Foodshare.
//!
//! Provides typed operations for providers, receivers, food listings and claims.
//! Every repository borrows the single [`Database`] handle; mutations go through
//! [`Database::execute_mutation`].

mod claim;
mod listing;
mod provider;
mod receiver;

pub use claim::ClaimRepository;
pub use listing::FoodListingRepository;
pub use provider::ProviderRepository;
pub use receiver::ReceiverRepository;

use super::Database;
use rusqlite::types::Type;
use std::str::FromStr;

/// Result type shared by the repositories.
pub type RepoResult<T> = Result<T, super::StorageError>;

/// Read a TEXT column and parse it into one of the domain enums.
pub(super) fn parse_column<T>(row: &rusqlite::Row<'_>, index: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    let raw: String = row.get(index)?;
    raw.parse()
        .map_err(|err: String| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, err.into()))
}

#[cfg(test)]
mod tests;
