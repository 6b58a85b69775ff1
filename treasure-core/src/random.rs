use std::f64::consts::TAU;

use rand::Rng;
use shared_types::{Coordinate, CoordinateError};

use crate::{config::RegionConfig, error::TreasureError, validity::PointValidator};

/// Uniform draw from the square of side `window_deg` centred on `center`.
pub fn sample_in_window<R: Rng + ?Sized>(
    rng: &mut R,
    center: Coordinate,
    window_deg: f64,
) -> Result<Coordinate, CoordinateError> {
    let lat = center.lat() + (rng.gen::<f64>() - 0.5) * window_deg;
    let lon = center.lon() + (rng.gen::<f64>() - 0.5) * window_deg;
    Coordinate::new(lat.clamp(-90.0, 90.0), lon.clamp(-180.0, 180.0))
}

/// Uniform-by-area draw from the disk of `radius_m` around `base`.
///
/// The distance is `sqrt(u) * radius`, not `u * radius`: the latter would
/// crowd points near the centre.
pub fn sample_in_disk<R: Rng + ?Sized>(rng: &mut R, base: Coordinate, radius_m: f64) -> Coordinate {
    let bearing = rng.gen_range(0.0..TAU);
    let distance = rng.gen::<f64>().sqrt() * radius_m;
    base.destination(bearing, distance)
}

/// Finds a base point near a regional centre plus a second point close to it,
/// both accepted by the validator.
#[derive(Debug, Clone)]
pub struct RandomPointGenerator<V> {
    validator: V,
    base_attempts: u32,
    nearby_attempts: u32,
}

impl<V: PointValidator> RandomPointGenerator<V> {
    pub fn new(validator: V, base_attempts: u32, nearby_attempts: u32) -> Self {
        Self {
            validator,
            base_attempts,
            nearby_attempts,
        }
    }

    pub fn for_region(validator: V, region: &RegionConfig) -> Self {
        Self::new(validator, region.base_attempts, region.nearby_attempts)
    }

    pub async fn generate_pair<R: Rng + Send>(
        &self,
        rng: &mut R,
        center: Coordinate,
        jitter_deg: f64,
        nearby_radius_m: f64,
    ) -> Result<(Coordinate, Coordinate), TreasureError> {
        for attempt in 1..=self.base_attempts {
            let base = sample_in_window(rng, center, jitter_deg)?;
            if !self.validator.is_acceptable(base).await {
                tracing::debug!(attempt, "base point rejected");
                continue;
            }

            if let Some(nearby) = self.nearby_point(rng, base, nearby_radius_m).await {
                tracing::debug!(attempt, "treasure pair found");
                return Ok((base, nearby));
            }
        }

        tracing::warn!(attempts = self.base_attempts, "could not find valid land points");
        Err(TreasureError::ExhaustedAttempts {
            attempts: self.base_attempts,
        })
    }

    async fn nearby_point<R: Rng + Send>(
        &self,
        rng: &mut R,
        base: Coordinate,
        radius_m: f64,
    ) -> Option<Coordinate> {
        for _ in 0..self.nearby_attempts {
            let candidate = sample_in_disk(rng, base, radius_m);
            if self.validator.is_acceptable(candidate).await {
                return Some(candidate);
            }
        }
        None
    }
}
