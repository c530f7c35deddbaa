//! Temperature Range Routes
//!
//! `start` and `end` are passed to the store as opaque strings and compared
//! lexicographically against `measurement.date`. Malformed dates are not
//! rejected; they usually match nothing and yield null aggregates.

use axum::{
    extract::{Path, State},
    Json,
};
use climate_storage::TemperatureStats;
use std::sync::Arc;
use tracing::debug;

use crate::{error::ApiError, AppState};

/// TMIN/TAVG/TMAX from `start` through the latest date in the store
pub async fn get_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureStats>>, ApiError> {
    let mut session = state.store.session().await?;
    let end = session.most_recent_date().await?;
    let stats = session.temperature_stats(&start, end.as_deref()).await?;

    debug!(%start, end = ?end, ?stats, "Temperature range");
    Ok(Json(vec![stats]))
}

/// TMIN/TAVG/TMAX over `start..=end`
pub async fn get_range(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureStats>>, ApiError> {
    let mut session = state.store.session().await?;
    let stats = session.temperature_stats(&start, Some(&end)).await?;

    debug!(%start, %end, ?stats, "Temperature range");
    Ok(Json(vec![stats]))
}
