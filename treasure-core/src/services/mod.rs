// HTTP adapters for the public OpenStreetMap services
pub mod nominatim;
pub mod osrm;

use reqwest::{Client, Response};
use serde_json::Value;

use crate::{config::ServiceConfig, error::TreasureError};

pub use nominatim::NominatimService;
pub use osrm::OsrmService;

/// Client shared by both adapters: identifying user agent plus timeout.
pub fn build_client(config: &ServiceConfig) -> Result<Client, TreasureError> {
    let client = Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout)
        .build()?;
    Ok(client)
}

async fn read_json(service: &'static str, response: Response) -> Result<Value, TreasureError> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(TreasureError::Status {
            service,
            status,
            body,
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
