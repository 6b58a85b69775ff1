use std::sync::OnceLock;

use thiserror::Error;
use treasure_core::{
    services::{build_client, NominatimService, OsrmService},
    ConfigError, TreasureConfig, TreasureError,
};

static SERVICES: OnceLock<TreasureServices> = OnceLock::new();

/// Process-wide handles to the external services, shared by every server
/// function.
#[derive(Debug)]
pub struct TreasureServices {
    pub geocoder: NominatimService,
    pub router: OsrmService,
    pub config: TreasureConfig,
}

#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build http client: {0}")]
    Client(#[from] TreasureError),

    #[error("services already initialized")]
    AlreadyInitialized,
}

pub fn init_services() -> Result<(), InitError> {
    let config = TreasureConfig::from_env()?;
    let client = build_client(&config.services)?;

    tracing::info!(
        geocoder = %config.services.geocoder_url,
        router = %config.services.router_url,
        "treasure services initialized"
    );

    SERVICES
        .set(TreasureServices {
            geocoder: NominatimService::new(client.clone(), &config.services),
            router: OsrmService::new(client, &config.services),
            config,
        })
        .map_err(|_| InitError::AlreadyInitialized)?;

    Ok(())
}

pub fn services() -> Option<&'static TreasureServices> {
    SERVICES.get()
}
