use leptos::prelude::*;
use leptos::server;
use shared_types::{Coordinate, Suggestion};

#[cfg(feature = "ssr")]
use crate::state::{services, TreasureServices};

#[cfg(feature = "ssr")]
fn registry() -> Result<&'static TreasureServices, ServerFnError> {
    services().ok_or_else(|| ServerFnError::new("Treasure services not initialized".to_string()))
}

/// Place suggestions for one search field. Short queries and geocoder
/// failures both come back as an empty list.
#[server]
pub async fn search_places(query: String) -> Result<Vec<Suggestion>, ServerFnError> {
    use treasure_core::GeocodeClient;

    let services = registry()?;
    let client = GeocodeClient::new(services.geocoder.clone());
    let suggestions = client.search(&query).await;
    tracing::debug!(query = %query, count = suggestions.len(), "search_places");
    Ok(suggestions)
}

/// A start point and a treasure point close to it, both on land inside the
/// configured region.
#[server]
pub async fn random_treasure_pair() -> Result<(Coordinate, Coordinate), ServerFnError> {
    use rand::{rngs::StdRng, SeedableRng};
    use treasure_core::{RandomPointGenerator, RegionRules, TreasureError, ValidityChecker};

    let services = registry()?;
    let region = &services.config.region;
    let checker = ValidityChecker::new(services.geocoder.clone(), RegionRules::from(region));
    let generator = RandomPointGenerator::for_region(checker, region);
    let mut rng = StdRng::from_entropy();

    match generator
        .generate_pair(
            &mut rng,
            region.center,
            region.jitter_degrees,
            region.nearby_radius_meters,
        )
        .await
    {
        Ok(pair) => Ok(pair),
        Err(TreasureError::ExhaustedAttempts { attempts }) => Err(ServerFnError::new(format!(
            "Could not find valid land points after {} attempts",
            attempts
        ))),
        Err(e) => Err(ServerFnError::new(format!("Random generation failed: {}", e))),
    }
}

#[server]
pub async fn driving_route(
    start: Coordinate,
    end: Coordinate,
) -> Result<Vec<Coordinate>, ServerFnError> {
    use treasure_core::RouteService;

    let services = registry()?;
    services
        .router
        .driving_route(start, end)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "routing request failed");
            ServerFnError::new(format!("Routing error: {}", e))
        })
}
