use std::{collections::BTreeMap, future::Future};

use shared_types::{Coordinate, Suggestion};

use crate::error::TreasureError;

/// Shorter (trimmed) queries never reach the network.
pub const MIN_QUERY_CHARS: usize = 3;

pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}

/// Address components of a reverse lookup, keyed by tag (`city`, `county`,
/// `park`, `water`, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressDetails {
    pub display_name: Option<String>,
    /// `None` when the service answered without an address block.
    pub components: Option<BTreeMap<String, String>>,
}

impl AddressDetails {
    pub fn component(&self, tag: &str) -> Option<&str> {
        self.components
            .as_ref()
            .and_then(|c| c.get(tag))
            .map(String::as_str)
    }
}

/// A forward/reverse geocoding provider.
pub trait Geocoder: Send + Sync {
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Suggestion>, TreasureError>> + Send;

    fn reverse(
        &self,
        point: Coordinate,
    ) -> impl Future<Output = Result<AddressDetails, TreasureError>> + Send;
}

/// Place search that never fails: short queries and provider errors both
/// come back as an empty list.
#[derive(Debug, Clone)]
pub struct GeocodeClient<G> {
    geocoder: G,
}

impl<G: Geocoder> GeocodeClient<G> {
    pub fn new(geocoder: G) -> Self {
        Self { geocoder }
    }

    pub async fn search(&self, query: &str) -> Vec<Suggestion> {
        let query = query.trim();
        if !is_searchable(query) {
            return Vec::new();
        }

        match self.geocoder.search(query).await {
            Ok(suggestions) => {
                tracing::debug!(query, count = suggestions.len(), "place search finished");
                suggestions
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "place search failed");
                Vec::new()
            }
        }
    }
}
