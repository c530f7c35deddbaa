//! Route handlers

pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;
pub mod welcome;
