use std::{str::FromStr, time::Duration};

use shared_types::{Coordinate, CoordinateError};
use thiserror::Error;

pub const DEFAULT_DISQUALIFYING_TAGS: [&str; 9] = [
    "water", "bay", "ocean", "sea", "river", "lake", "park", "forest", "beach",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}={value:?} is not valid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Region center is not a valid coordinate: {0}")]
    Center(#[from] CoordinateError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreasureConfig {
    pub services: ServiceConfig,
    pub region: RegionConfig,
}

/// Endpoints and request shaping for the external services.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub geocoder_url: String,
    pub router_url: String,
    pub user_agent: String,
    pub search_limit: u8,
    pub search_language: String,
    pub country_codes: Option<String>,
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
            router_url: "https://router.project-osrm.org".to_string(),
            user_agent: "treasure-map/0.1".to_string(),
            search_limit: 5,
            search_language: "en".to_string(),
            country_codes: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// An exact, case-sensitive match against one field of a reverse-geocoded
/// address, e.g. `city == "Los Angeles"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressMatch {
    pub field: String,
    pub value: String,
}

impl AddressMatch {
    pub fn new(field: &str, value: &str) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Where random treasure may be placed and how hard to look for it.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionConfig {
    /// Any one of these matching accepts the region.
    pub matches: Vec<AddressMatch>,
    pub disqualifying_tags: Vec<String>,
    pub center: Coordinate,
    /// Side length of the square window around `center`, in degrees.
    pub jitter_degrees: f64,
    pub nearby_radius_meters: f64,
    pub base_attempts: u32,
    pub nearby_attempts: u32,
}

impl RegionConfig {
    pub fn los_angeles() -> Result<Self, ConfigError> {
        Ok(Self {
            matches: vec![
                AddressMatch::new("city", "Los Angeles"),
                AddressMatch::new("county", "Los Angeles County"),
            ],
            disqualifying_tags: DEFAULT_DISQUALIFYING_TAGS
                .iter()
                .map(|tag| tag.to_string())
                .collect(),
            // Downtown LA
            center: Coordinate::new(34.0522, -118.2437)?,
            jitter_degrees: 0.02,
            nearby_radius_meters: 1000.0,
            base_attempts: 5,
            nearby_attempts: 5,
        })
    }
}

impl TreasureConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; unset keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut services = ServiceConfig::default();
        let mut region = RegionConfig::los_angeles()?;

        if let Some(url) = lookup("NOMINATIM_URL") {
            services.geocoder_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = lookup("OSRM_URL") {
            services.router_url = url.trim_end_matches('/').to_string();
        }
        if let Some(agent) = lookup("TREASURE_USER_AGENT") {
            services.user_agent = agent;
        }
        if let Some(limit) = parse(&lookup, "TREASURE_SEARCH_LIMIT")? {
            services.search_limit = limit;
        }
        if let Some(language) = lookup("TREASURE_SEARCH_LANGUAGE") {
            services.search_language = language;
        }
        services.country_codes = lookup("TREASURE_COUNTRY_CODES").filter(|c| !c.is_empty());
        if let Some(secs) = parse::<u64, _>(&lookup, "TREASURE_HTTP_TIMEOUT_SECS")? {
            services.timeout = Duration::from_secs(secs);
        }

        let city = lookup("TREASURE_REGION_CITY");
        let county = lookup("TREASURE_REGION_COUNTY");
        if city.is_some() || county.is_some() {
            region.matches = city
                .iter()
                .map(|value| AddressMatch::new("city", value))
                .chain(county.iter().map(|value| AddressMatch::new("county", value)))
                .collect();
        }
        if let Some(tags) = lookup("TREASURE_DISQUALIFYING_TAGS") {
            region.disqualifying_tags = tags
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect();
        }

        let lat = parse(&lookup, "TREASURE_CENTER_LAT")?.unwrap_or(region.center.lat());
        let lon = parse(&lookup, "TREASURE_CENTER_LON")?.unwrap_or(region.center.lon());
        region.center = Coordinate::new(lat, lon)?;

        if let Some(jitter) = parse_positive(&lookup, "TREASURE_JITTER_DEGREES")? {
            region.jitter_degrees = jitter;
        }
        if let Some(radius) = parse_positive(&lookup, "TREASURE_NEARBY_RADIUS_METERS")? {
            region.nearby_radius_meters = radius;
        }
        if let Some(attempts) = parse_attempts(&lookup, "TREASURE_BASE_ATTEMPTS")? {
            region.base_attempts = attempts;
        }
        if let Some(attempts) = parse_attempts(&lookup, "TREASURE_NEARBY_ATTEMPTS")? {
            region.nearby_attempts = attempts;
        }

        Ok(Self { services, region })
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Invalid {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}

fn parse_positive<F>(lookup: &F, key: &'static str) -> Result<Option<f64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match parse::<f64, F>(lookup, key)? {
        Some(value) if !(value.is_finite() && value > 0.0) => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "must be a positive number".to_string(),
        }),
        other => Ok(other),
    }
}

fn parse_attempts<F>(lookup: &F, key: &'static str) -> Result<Option<u32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match parse::<u32, F>(lookup, key)? {
        Some(0) => Err(ConfigError::Invalid {
            key,
            value: "0".to_string(),
            reason: "at least one attempt is required".to_string(),
        }),
        other => Ok(other),
    }
}
