use std::future::Future;

use shared_types::Coordinate;

use crate::{
    config::{AddressMatch, RegionConfig},
    geocode::{AddressDetails, Geocoder},
};

/// Decides whether a point may hold treasure.
pub trait PointValidator: Send + Sync {
    fn is_acceptable(&self, point: Coordinate) -> impl Future<Output = bool> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    NoAddress,
    OutsideRegion,
    Disqualified(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionRules {
    pub matches: Vec<AddressMatch>,
    pub disqualifying_tags: Vec<String>,
}

impl From<&RegionConfig> for RegionRules {
    fn from(config: &RegionConfig) -> Self {
        Self {
            matches: config.matches.clone(),
            disqualifying_tags: config.disqualifying_tags.clone(),
        }
    }
}

impl RegionRules {
    pub fn classify(&self, details: &AddressDetails) -> Verdict {
        if details.components.is_none() {
            return Verdict::NoAddress;
        }

        let in_region = self
            .matches
            .iter()
            .any(|m| details.component(&m.field) == Some(m.value.as_str()));
        if !in_region {
            return Verdict::OutsideRegion;
        }

        let hit = self
            .disqualifying_tags
            .iter()
            .find(|tag| details.component(tag).is_some_and(|v| !v.is_empty()));
        match hit {
            Some(tag) => Verdict::Disqualified(tag.clone()),
            None => Verdict::Accepted,
        }
    }
}

/// Reverse-geocodes a point once and applies [`RegionRules`]. Lookup
/// failures reject the point.
#[derive(Debug, Clone)]
pub struct ValidityChecker<G> {
    geocoder: G,
    rules: RegionRules,
}

impl<G: Geocoder> ValidityChecker<G> {
    pub fn new(geocoder: G, rules: RegionRules) -> Self {
        Self { geocoder, rules }
    }
}

impl<G: Geocoder> PointValidator for ValidityChecker<G> {
    async fn is_acceptable(&self, point: Coordinate) -> bool {
        let details = match self.geocoder.reverse(point).await {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!(lat = point.lat(), lon = point.lon(), error = %e, "reverse lookup failed");
                return false;
            }
        };

        let verdict = self.rules.classify(&details);
        tracing::debug!(lat = point.lat(), lon = point.lon(), ?verdict, "checked point");
        verdict == Verdict::Accepted
    }
}
