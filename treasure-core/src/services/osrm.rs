use reqwest::Client;
use serde_json::Value;
use shared_types::Coordinate;

use crate::{config::ServiceConfig, error::TreasureError, route::RouteService};

const SERVICE: &str = "osrm";

/// OSRM driving directions.
#[derive(Debug, Clone)]
pub struct OsrmService {
    client: Client,
    base_url: String,
}

impl OsrmService {
    pub fn new(client: Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            base_url: config.router_url.clone(),
        }
    }
}

/// OSRM wants `lon,lat` pairs in the path.
pub fn route_url(base_url: &str, start: Coordinate, end: Coordinate) -> String {
    format!(
        "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
        base_url,
        start.lon(),
        start.lat(),
        end.lon(),
        end.lat()
    )
}

impl RouteService for OsrmService {
    async fn driving_route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Vec<Coordinate>, TreasureError> {
        let response = self
            .client
            .get(route_url(&self.base_url, start, end))
            .send()
            .await?;

        let value = super::read_json(SERVICE, response).await?;
        parse_route_geometry(&value)
    }
}

/// Pulls `routes[0].geometry.coordinates` and flips each `[lon, lat]` into
/// a [`Coordinate`].
pub fn parse_route_geometry(value: &Value) -> Result<Vec<Coordinate>, TreasureError> {
    let points = value
        .get("routes")
        .and_then(|r| r.get(0))
        .and_then(|r| r.get("geometry"))
        .and_then(|g| g.get("coordinates"))
        .and_then(Value::as_array)
        .ok_or(TreasureError::MissingRoute)?;

    let path = points
        .iter()
        .map(|pair| {
            let lon = pair.get(0).and_then(Value::as_f64);
            let lat = pair.get(1).and_then(Value::as_f64);
            match (lat, lon) {
                (Some(lat), Some(lon)) => Ok(Coordinate::new(lat, lon)?),
                _ => Err(TreasureError::MissingRoute),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    if path.len() < 2 {
        return Err(TreasureError::MissingRoute);
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn url_uses_lon_lat_order() {
        let url = route_url(
            "https://router.project-osrm.org",
            coord(34.05, -118.24),
            coord(34.06, -118.25),
        );
        assert_eq!(
            url,
            "https://router.project-osrm.org/route/v1/driving/-118.24,34.05;-118.25,34.06?overview=full&geometries=geojson"
        );
    }

    #[test]
    fn geometry_is_flipped_to_lat_lon() {
        let body = json!({
            "code": "Ok",
            "routes": [{
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-118.24, 34.05], [-118.245, 34.055], [-118.25, 34.06]]
                },
                "distance": 1520.3
            }]
        });

        let path = parse_route_geometry(&body).unwrap();

        assert_eq!(
            path,
            vec![coord(34.05, -118.24), coord(34.055, -118.245), coord(34.06, -118.25)]
        );
    }

    #[test]
    fn missing_routes_are_an_error() {
        let no_route = json!({"code": "NoRoute", "message": "Impossible route between points"});
        assert!(matches!(
            parse_route_geometry(&no_route),
            Err(TreasureError::MissingRoute)
        ));

        let empty = json!({"code": "Ok", "routes": []});
        assert!(matches!(parse_route_geometry(&empty), Err(TreasureError::MissingRoute)));

        let single = json!({"routes": [{"geometry": {"coordinates": [[-118.24, 34.05]]}}]});
        assert!(matches!(parse_route_geometry(&single), Err(TreasureError::MissingRoute)));
    }

    #[test]
    fn out_of_range_points_are_rejected() {
        let body = json!({"routes": [{"geometry": {"coordinates": [[-118.24, 134.05], [0.0, 0.0]]}}]});
        assert!(matches!(
            parse_route_geometry(&body),
            Err(TreasureError::Coordinate(_))
        ));
    }
}
