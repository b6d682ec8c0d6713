//! SQLite database setup and connection management for Foodshare
//! Handles schema creation and the two statement entry points every caller goes through.

use rusqlite::types::Value;
use rusqlite::{Connection, Params};
use std::path::{Path, PathBuf};

use super::StorageError;
use super::result::QueryResult;

/// File name used when no path is configured.
pub const DEFAULT_DB_FILE: &str = "food_sharing.db";

/// Database wrapper that owns the process-wide SQLite connection.
///
/// Opened once at startup and passed by reference to repositories and the
/// query catalog. Dropping it (or calling [`Database::close`]) releases the
/// connection.
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Create an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn, path: None };
        db.init()?;
        Ok(db)
    }

    /// Create or open the database at a specific path
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path).map_err(|source| StorageError::Open {
            path: path.clone(),
            source,
        })?;
        log::info!("Opened database at {}", path.display());

        let db = Self {
            conn,
            path: Some(path),
        };
        db.init()?;
        Ok(db)
    }

    /// Location of the backing file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get a reference to the connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run one INSERT/UPDATE/DELETE with bound parameters.
    ///
    /// The statement commits on return. Yields the number of affected rows.
    pub fn execute_mutation<P: Params>(&self, sql: &str, params: P) -> Result<usize, StorageError> {
        log::debug!("mutation: {}", compact_sql(sql));
        let affected = self.conn.execute(sql, params)?;
        log::debug!("mutation affected {affected} row(s)");
        Ok(affected)
    }

    /// Run one SELECT with bound parameters and collect every row.
    pub fn execute_query<P: Params>(&self, sql: &str, params: P) -> Result<QueryResult, StorageError> {
        log::debug!("query: {}", compact_sql(sql));
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let mut result = QueryResult::new(columns);
        let mut rows = stmt.query(params)?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(width);
            for index in 0..width {
                values.push(row.get::<_, Value>(index)?);
            }
            result.push(values);
        }
        log::debug!("query returned {} row(s)", result.len());
        Ok(result)
    }

    /// Release the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> Result<(), StorageError> {
        self.conn.close().map_err(|(_, err)| StorageError::from(err))
    }

    pub fn listing_repo(&self) -> super::repository::FoodListingRepository<'_> {
        super::repository::FoodListingRepository::new(self)
    }

    pub fn provider_repo(&self) -> super::repository::ProviderRepository<'_> {
        super::repository::ProviderRepository::new(self)
    }

    pub fn receiver_repo(&self) -> super::repository::ReceiverRepository<'_> {
        super::repository::ReceiverRepository::new(self)
    }

    pub fn claim_repo(&self) -> super::repository::ClaimRepository<'_> {
        super::repository::ClaimRepository::new(self)
    }

    /// Initialize database schema
    fn init(&self) -> Result<(), StorageError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Self::create_schema(&self.conn)
    }

    fn create_schema(conn: &Connection) -> Result<(), StorageError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS Providers (
                Provider_ID INTEGER PRIMARY KEY,
                Name TEXT NOT NULL,
                Type TEXT NOT NULL,
                Address TEXT,
                City TEXT NOT NULL,
                Contact TEXT
            );

            CREATE TABLE IF NOT EXISTS Receivers (
                Receiver_ID INTEGER PRIMARY KEY,
                Name TEXT NOT NULL,
                Type TEXT NOT NULL,
                City TEXT NOT NULL,
                Contact TEXT
            );

            CREATE TABLE IF NOT EXISTS Food_Listings (
                Food_ID INTEGER PRIMARY KEY,
                Food_Name TEXT NOT NULL,
                Quantity INTEGER NOT NULL,
                Expiry_Date TEXT NOT NULL,
                Provider_ID INTEGER NOT NULL,
                Provider_Type TEXT NOT NULL,
                Location TEXT NOT NULL,
                Food_Type TEXT NOT NULL,
                Meal_Type TEXT NOT NULL,
                FOREIGN KEY(Provider_ID) REFERENCES Providers(Provider_ID)
            );

            CREATE TABLE IF NOT EXISTS Claims (
                Claim_ID INTEGER PRIMARY KEY,
                Food_ID INTEGER NOT NULL,
                Receiver_ID INTEGER NOT NULL,
                Status TEXT NOT NULL,
                Timestamp TEXT NOT NULL,
                FOREIGN KEY(Food_ID) REFERENCES Food_Listings(Food_ID) ON DELETE CASCADE,
                FOREIGN KEY(Receiver_ID) REFERENCES Receivers(Receiver_ID)
            );

            CREATE INDEX IF NOT EXISTS idx_food_listings_provider ON Food_Listings(Provider_ID);
            CREATE INDEX IF NOT EXISTS idx_food_listings_location ON Food_Listings(Location);
            CREATE INDEX IF NOT EXISTS idx_claims_food ON Claims(Food_ID);
            CREATE INDEX IF NOT EXISTS idx_claims_receiver ON Claims(Receiver_ID);
            "#,
        )?;
        Ok(())
    }
}

fn compact_sql(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}
