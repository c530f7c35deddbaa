//! Storage Layer
//!
//! Read-only SQLite access to the `measurement` and `station` tables.
//! A [`ClimateStore`] owns the connection pool; handlers borrow a
//! [`Session`] for the duration of one request.

mod repository;
mod schema;
mod window;

pub use repository::{ClimateStore, Session, StoreConfig, TemperatureStats, DEFAULT_DATABASE_URL};
pub use schema::{verify_schema, Measurement, Station, TableSchema, MEASUREMENT, STATION};
pub use window::{one_year_before, WINDOW_DAYS};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to open store at {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("Table '{0}' not found in store")]
    MissingTable(&'static str),
    #[error("Column '{column}' missing from table '{table}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("Query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Stored date '{0}' is not a YYYY-MM-DD date")]
    InvalidDate(String),
}
