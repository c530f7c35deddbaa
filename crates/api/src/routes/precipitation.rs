//! Precipitation Routes

use axum::{extract::State, Json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::{error::ApiError, AppState};

/// Date to precipitation; `None` serialises as `null`
pub type PrecipitationByDate = BTreeMap<String, Option<f64>>;

/// Last 12 months of precipitation, keyed by date.
///
/// Several stations report on the same date, so later rows overwrite
/// earlier ones for that date.
pub async fn get_precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PrecipitationByDate>, ApiError> {
    let mut session = state.store.session().await?;

    let Some(since) = session.last_year_start().await? else {
        debug!("No measurements; empty precipitation window");
        return Ok(Json(PrecipitationByDate::new()));
    };

    let rows = session.measurements_since(&since).await?;
    let row_count = rows.len();

    let mut by_date = PrecipitationByDate::new();
    for m in rows {
        by_date.insert(m.date, m.prcp);
    }

    debug!(%since, rows = row_count, dates = by_date.len(), "Precipitation window");
    Ok(Json(by_date))
}
