use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean earth radius used for great-circle math, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

#[derive(Debug, Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

/// A validated (latitude, longitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat, raw.lon)
    }
}

impl Coordinate {
    pub const ORIGIN: Coordinate = Coordinate { lat: 0.0, lon: 0.0 };

    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::Latitude(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::Longitude(lon));
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Haversine distance to `other`.
    pub fn distance_meters(&self, other: &Coordinate) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let sin_dlat = (dlat / 2.0).sin();
        let sin_dlon = (dlon / 2.0).sin();

        let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
        2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
    }

    /// Point reached by travelling `distance_m` along the great circle that
    /// leaves `self` at `bearing_rad` (clockwise from north).
    pub fn destination(&self, bearing_rad: f64, distance_m: f64) -> Coordinate {
        let angular = distance_m / EARTH_RADIUS_METERS;
        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();

        let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing_rad.cos())
            .clamp(-1.0, 1.0)
            .asin();
        let lon2 = lon1
            + (bearing_rad.sin() * angular.sin() * lat1.cos())
                .atan2(angular.cos() - lat1.sin() * lat2.sin());

        // Wrap into [-180, 180].
        let lon_deg = (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
        Coordinate {
            lat: lat2.to_degrees().clamp(-90.0, 90.0),
            lon: lon_deg,
        }
    }
}

/// The confirmed start/end selection. Position 0 is the start.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum LocationSet {
    #[default]
    Empty,
    Single(Coordinate),
    Pair(Coordinate, Coordinate),
}

impl LocationSet {
    pub fn from_parts(start: Option<Coordinate>, end: Option<Coordinate>) -> Self {
        match (start, end) {
            (Some(start), Some(end)) => LocationSet::Pair(start, end),
            (Some(point), None) | (None, Some(point)) => LocationSet::Single(point),
            (None, None) => LocationSet::Empty,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LocationSet::Empty => 0,
            LocationSet::Single(_) => 1,
            LocationSet::Pair(_, _) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, LocationSet::Empty)
    }

    pub fn points(&self) -> Vec<Coordinate> {
        match *self {
            LocationSet::Empty => Vec::new(),
            LocationSet::Single(point) => vec![point],
            LocationSet::Pair(start, end) => vec![start, end],
        }
    }

    pub fn flipped(&self) -> Self {
        match *self {
            LocationSet::Pair(start, end) => LocationSet::Pair(end, start),
            other => other,
        }
    }
}

/// A candidate place returned by a geocoding search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub label: String,
    pub coordinate: Coordinate,
}

/// Axis-aligned lat/lon box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    pub fn covering(points: &[Coordinate]) -> Option<Self> {
        let first = points.first()?;
        let (mut south, mut west, mut north, mut east) =
            (first.lat, first.lon, first.lat, first.lon);
        for point in &points[1..] {
            south = south.min(point.lat);
            north = north.max(point.lat);
            west = west.min(point.lon);
            east = east.max(point.lon);
        }
        Some(Self {
            south_west: Coordinate { lat: south, lon: west },
            north_east: Coordinate { lat: north, lon: east },
        })
    }
}
