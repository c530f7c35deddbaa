//! Temperature Observation Routes

use axum::{extract::State, Json};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;
use tracing::debug;

use crate::{error::ApiError, AppState};

/// One observation, serialised as the single-entry object `{"<date>": <tobs>}`
#[derive(Debug, Clone, PartialEq)]
pub struct DatedObservation {
    pub date: String,
    pub tobs: Option<f64>,
}

impl Serialize for DatedObservation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.tobs)?;
        map.end()
    }
}

/// Last 12 months of temperature observations for the most active station
pub async fn get_tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DatedObservation>>, ApiError> {
    let mut session = state.store.session().await?;

    let Some((station, observations)) = session.most_active_station().await? else {
        debug!("No measurements; no active station");
        return Ok(Json(Vec::new()));
    };
    let Some(since) = session.last_year_start().await? else {
        return Ok(Json(Vec::new()));
    };

    let temps: Vec<DatedObservation> = session
        .station_measurements_since(&station, &since)
        .await?
        .into_iter()
        .map(|m| DatedObservation {
            date: m.date,
            tobs: m.tobs,
        })
        .collect();

    debug!(
        %station,
        observations,
        %since,
        returned = temps.len(),
        "Most active station temperatures"
    );
    Ok(Json(temps))
}
