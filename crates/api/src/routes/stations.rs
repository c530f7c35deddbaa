//! Station Routes

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;

use crate::{error::ApiError, AppState};

/// List every station id, in store order
pub async fn get_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let mut session = state.store.session().await?;
    let ids: Vec<String> = session
        .stations()
        .await?
        .into_iter()
        .map(|s| s.station)
        .collect();

    debug!(count = ids.len(), "Stations listed");
    Ok(Json(ids))
}
