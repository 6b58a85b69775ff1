use shared_types::CoordinateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreasureError {
    #[cfg(feature = "remote")]
    #[error("Underlying request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{service} returned status {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Routing response did not contain a usable route")]
    MissingRoute,

    #[error("No acceptable pair of points found after {attempts} attempts")]
    ExhaustedAttempts { attempts: u32 },

    #[error("Invalid coordinate: {0}")]
    Coordinate(#[from] CoordinateError),

    // Error text relayed from the server when running in the browser
    #[error("Upstream error: {0}")]
    Upstream(String),
}
