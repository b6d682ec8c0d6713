//! Raw table browsing ("Data Exploration") and the home overview counts.

use std::fmt;
use std::str::FromStr;

use crate::domain::ExploreError;
use crate::infra::db::{Database, QueryResult, StorageError};

/// The four browsable tables. Table names only ever come from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataTable {
    Providers,
    Receivers,
    FoodListings,
    Claims,
}

impl DataTable {
    pub const ALL: [DataTable; 4] = [
        Self::Providers,
        Self::Receivers,
        Self::FoodListings,
        Self::Claims,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            Self::Providers => "Providers",
            Self::Receivers => "Receivers",
            Self::FoodListings => "Food_Listings",
            Self::Claims => "Claims",
        }
    }

    fn primary_key(self) -> &'static str {
        match self {
            Self::Providers => "Provider_ID",
            Self::Receivers => "Receiver_ID",
            Self::FoodListings => "Food_ID",
            Self::Claims => "Claim_ID",
        }
    }

    pub fn count(self, db: &Database) -> Result<i64, StorageError> {
        let sql = format!("SELECT COUNT(*) AS n FROM {}", self.table_name());
        let result = db.execute_query(&sql, [])?;
        Ok(result
            .rows()
            .first()
            .and_then(|row| row.get_i64("n"))
            .unwrap_or(0))
    }
}

impl fmt::Display for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for DataTable {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "providers" => Ok(Self::Providers),
            "receivers" => Ok(Self::Receivers),
            "food_listings" | "listings" => Ok(Self::FoodListings),
            "claims" => Ok(Self::Claims),
            _ => Err(ExploreError::UnknownTable(s.to_string())),
        }
    }
}

/// A validated browse request: one table, optionally filtered by location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exploration {
    table: DataTable,
    location: Option<String>,
}

impl Exploration {
    /// The location filter only exists for `Food_Listings`.
    pub fn new(table: DataTable, location: Option<String>) -> Result<Self, ExploreError> {
        if location.is_some() && table != DataTable::FoodListings {
            return Err(ExploreError::LocationFilterUnsupported(
                table.table_name().to_string(),
            ));
        }
        Ok(Self { table, location })
    }

    pub fn run(&self, db: &Database) -> Result<QueryResult, StorageError> {
        let table = self.table.table_name();
        let key = self.table.primary_key();
        match &self.location {
            Some(location) => db.execute_query(
                &format!("SELECT * FROM {table} WHERE Location = ?1 ORDER BY {key}"),
                [location],
            ),
            None => db.execute_query(&format!("SELECT * FROM {table} ORDER BY {key}"), []),
        }
    }
}

/// Row counts of all four tables, in menu order.
pub fn table_counts(db: &Database) -> Result<Vec<(DataTable, i64)>, StorageError> {
    DataTable::ALL
        .into_iter()
        .map(|table| Ok((table, table.count(db)?)))
        .collect()
}
