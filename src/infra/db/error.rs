use std::path::PathBuf;
use thiserror::Error;

/// The single storage failure kind: malformed SQL, a missing table or column,
/// or a constraint violation. It is never retried or translated.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to open database at {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to create database directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StorageError {
    /// True when the store rejected a statement because of a constraint
    /// (foreign key, NOT NULL, primary key).
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Self::Sqlite(rusqlite::Error::SqliteFailure(err, _)) => {
                err.code == rusqlite::ErrorCode::ConstraintViolation
            }
            _ => false,
        }
    }
}
