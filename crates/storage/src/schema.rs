//! Table definitions
//!
//! The store is created and populated elsewhere. These definitions mirror
//! the columns the queries rely on and are checked once at startup.

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::StorageError;

/// Expected shape of one table
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// `measurement`: one observation per station per date
pub const MEASUREMENT: TableSchema = TableSchema {
    name: "measurement",
    columns: &["station", "date", "prcp", "tobs"],
};

/// `station`: descriptive station metadata
pub const STATION: TableSchema = TableSchema {
    name: "station",
    columns: &["station", "name", "latitude", "longitude", "elevation"],
};

/// A row of the `measurement` table
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Measurement {
    pub station: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Precipitation; often missing
    pub prcp: Option<f64>,
    /// Temperature observation
    pub tobs: Option<f64>,
}

/// A row of the `station` table
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Station {
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// Check that both tables exist with every column the queries use.
pub async fn verify_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    for table in [MEASUREMENT, STATION] {
        verify_table(pool, &table).await?;
    }
    info!("Store schema verified");
    Ok(())
}

async fn verify_table(pool: &SqlitePool, table: &TableSchema) -> Result<(), StorageError> {
    let present: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?1)")
        .bind(table.name)
        .fetch_all(pool)
        .await?;

    if present.is_empty() {
        return Err(StorageError::MissingTable(table.name));
    }

    for &column in table.columns {
        if !present.iter().any(|c| c.eq_ignore_ascii_case(column)) {
            return Err(StorageError::MissingColumn {
                table: table.name,
                column,
            });
        }
    }

    debug!(table = table.name, columns = present.len(), "Table verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        // A single connection keeps every query on the same in-memory database.
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    async fn create_station_table(pool: &SqlitePool) {
        sqlx::query(
            "CREATE TABLE station (id INTEGER PRIMARY KEY, station TEXT, name TEXT, \
             latitude FLOAT, longitude FLOAT, elevation FLOAT)",
        )
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_complete_schema_passes() {
        let pool = memory_pool().await;
        create_station_table(&pool).await;
        sqlx::query(
            "CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, \
             prcp FLOAT, tobs FLOAT)",
        )
        .execute(&pool)
        .await
        .unwrap();

        verify_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_table_is_reported() {
        let pool = memory_pool().await;
        create_station_table(&pool).await;

        let err = verify_schema(&pool).await.unwrap_err();
        assert!(matches!(err, StorageError::MissingTable("measurement")));
    }

    #[tokio::test]
    async fn test_missing_column_is_reported() {
        let pool = memory_pool().await;
        create_station_table(&pool).await;
        sqlx::query("CREATE TABLE measurement (station TEXT, date TEXT, prcp FLOAT)")
            .execute(&pool)
            .await
            .unwrap();

        let err = verify_schema(&pool).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::MissingColumn {
                table: "measurement",
                column: "tobs"
            }
        ));
    }
}
