//! Store and Session Implementation

use crate::schema::{verify_schema, Measurement, Station};
use crate::window::one_year_before;
use crate::StorageError;
use serde::Serialize;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Data-store location used when none is configured
pub const DEFAULT_DATABASE_URL: &str = "sqlite://hawaii.sqlite";

/// Connection settings for the store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// SQLite URL, e.g. `sqlite://hawaii.sqlite`
    pub url: String,
    /// Pool size
    pub max_connections: u32,
    /// How long a handler waits for a free connection
    pub acquire_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Min/avg/max temperature over a date range
///
/// All three are `None` when no rows fall in the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureStats {
    #[serde(rename = "TMIN")]
    pub min: Option<f64>,
    #[serde(rename = "TAVG")]
    pub avg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub max: Option<f64>,
}

/// Read-only handle on the climate database
#[derive(Debug, Clone)]
pub struct ClimateStore {
    pool: SqlitePool,
}

impl ClimateStore {
    /// Open the store read-only and verify its tables
    pub async fn open(config: &StoreConfig) -> Result<Self, StorageError> {
        info!(url = %config.url, "Opening climate store");

        let connect_err = |source| StorageError::Connect {
            url: config.url.clone(),
            source,
        };

        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(connect_err)?
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(connect_err)?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, verifying its tables first
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StorageError> {
        verify_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Borrow a connection for the duration of one request.
    ///
    /// The connection goes back to the pool when the [`Session`] is dropped.
    pub async fn session(&self) -> Result<Session, StorageError> {
        let conn = self.pool.acquire().await?;
        debug!(
            idle = self.pool.num_idle(),
            size = self.pool.size(),
            "Session acquired"
        );
        Ok(Session { conn })
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Climate store closed");
    }
}

/// One pooled connection, scoped to a single request
pub struct Session {
    conn: PoolConnection<Sqlite>,
}

impl Session {
    /// Cheap round trip used by the health check
    pub async fn ping(&mut self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&mut *self.conn).await?;
        Ok(())
    }

    /// Latest date in `measurement`; `None` for an empty table
    pub async fn most_recent_date(&mut self) -> Result<Option<String>, StorageError> {
        let date: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(date)
    }

    /// First date of the trailing 365-day window ending at the latest date
    pub async fn last_year_start(&mut self) -> Result<Option<String>, StorageError> {
        match self.most_recent_date().await? {
            Some(latest) => {
                let start = one_year_before(&latest)?;
                debug!(%latest, %start, "Trailing year window");
                Ok(Some(start))
            }
            None => Ok(None),
        }
    }

    /// Every measurement dated on or after `since`, in store order
    pub async fn measurements_since(
        &mut self,
        since: &str,
    ) -> Result<Vec<Measurement>, StorageError> {
        let rows = sqlx::query_as::<_, Measurement>(
            "SELECT station, date, prcp, tobs FROM measurement WHERE date >= ?1",
        )
        .bind(since)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    /// Measurements for one station dated on or after `since`, in store order
    pub async fn station_measurements_since(
        &mut self,
        station: &str,
        since: &str,
    ) -> Result<Vec<Measurement>, StorageError> {
        let rows = sqlx::query_as::<_, Measurement>(
            "SELECT station, date, prcp, tobs FROM measurement \
             WHERE station = ?1 AND date >= ?2",
        )
        .bind(station)
        .bind(since)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    /// All stations, in store order
    pub async fn stations(&mut self) -> Result<Vec<Station>, StorageError> {
        let rows = sqlx::query_as::<_, Station>(
            "SELECT station, name, latitude, longitude, elevation FROM station",
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    /// Station with the most measurement rows, with its row count.
    ///
    /// Ties go to the lexicographically smallest station id.
    pub async fn most_active_station(&mut self) -> Result<Option<(String, i64)>, StorageError> {
        let row = sqlx::query_as::<_, (String, i64)>(
            "SELECT station, COUNT(station) AS observations FROM measurement \
             GROUP BY station ORDER BY observations DESC, station ASC LIMIT 1",
        )
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    /// Min/avg/max `tobs` over `start <= date <= end`, both inclusive.
    ///
    /// Dates are compared as strings. A `None` end matches nothing.
    pub async fn temperature_stats(
        &mut self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats, StorageError> {
        let (min, avg, max) = sqlx::query_as::<_, (Option<f64>, Option<f64>, Option<f64>)>(
            "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement \
             WHERE date >= ?1 AND date <= ?2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(TemperatureStats { min, avg, max })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!("Session released");
    }
}
