//! Climate Observations API - Main Entry Point

use climate_api::{init_logging, run_server, ApiConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::load()?;
    init_logging(&config.log)?;

    info!("=== Climate API v{} ===", env!("CARGO_PKG_VERSION"));
    info!(store = %config.database.url, "Configuration loaded");

    if let Err(e) = run_server(config).await {
        error!(error = %e, "Climate API failed to start or stopped with an error");
        return Err(e);
    }

    Ok(())
}
