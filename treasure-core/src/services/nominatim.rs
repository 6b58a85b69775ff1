use std::collections::BTreeMap;

use reqwest::Client;
use serde_json::Value;
use shared_types::{Coordinate, Suggestion};

use crate::{
    config::ServiceConfig,
    error::TreasureError,
    geocode::{AddressDetails, Geocoder},
};

const SERVICE: &str = "nominatim";

/// Nominatim search + reverse lookups.
#[derive(Debug, Clone)]
pub struct NominatimService {
    client: Client,
    base_url: String,
    limit: u8,
    language: String,
    country_codes: Option<String>,
}

impl NominatimService {
    pub fn new(client: Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            base_url: config.geocoder_url.clone(),
            limit: config.search_limit,
            language: config.search_language.clone(),
            country_codes: config.country_codes.clone(),
        }
    }

    fn search_params(&self, query: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", "json".to_string()),
            ("q", query.to_string()),
            ("limit", self.limit.to_string()),
            ("accept-language", self.language.clone()),
        ];
        if let Some(codes) = &self.country_codes {
            params.push(("countrycodes", codes.clone()));
        }
        params
    }
}

impl Geocoder for NominatimService {
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, TreasureError> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&self.search_params(query))
            .send()
            .await?;

        let value = super::read_json(SERVICE, response).await?;
        Ok(parse_search_results(&value))
    }

    async fn reverse(&self, point: Coordinate) -> Result<AddressDetails, TreasureError> {
        let response = self
            .client
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("format", "json".to_string()),
                ("lat", point.lat().to_string()),
                ("lon", point.lon().to_string()),
                ("zoom", "18".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await?;

        let value = super::read_json(SERVICE, response).await?;
        Ok(parse_reverse(&value))
    }
}

/// Turns a `/search` response into suggestions. Records without a usable
/// position are skipped.
pub fn parse_search_results(value: &Value) -> Vec<Suggestion> {
    let records = match value.as_array() {
        Some(records) => records,
        None => return Vec::new(),
    };

    records.iter().filter_map(convert_record).collect()
}

fn convert_record(record: &Value) -> Option<Suggestion> {
    let lat = extract_number(&record["lat"])?;
    let lon = extract_number(&record["lon"])?;
    let coordinate = Coordinate::new(lat, lon).ok()?;

    let id = match &record["place_id"] {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => format!("{lat},{lon}"),
    };

    Some(Suggestion {
        id,
        label: record["display_name"].as_str().unwrap_or_default().to_string(),
        coordinate,
    })
}

/// Nominatim sends coordinates as strings.
fn extract_number(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        other => other.as_f64(),
    }
}

pub fn parse_reverse(value: &Value) -> AddressDetails {
    let components = value.get("address").and_then(Value::as_object).map(|address| {
        address
            .iter()
            .filter_map(|(tag, v)| v.as_str().map(|s| (tag.clone(), s.to_string())))
            .collect::<BTreeMap<_, _>>()
    });

    AddressDetails {
        display_name: value
            .get("display_name")
            .and_then(Value::as_str)
            .map(str::to_string),
        components,
    }
}
