//! Location selection and route drawing for the treasure map creator.
//!
//! The workflow is framework free: the web crate plugs its Leaflet map in
//! through [`route::MapSurface`] and reaches the external services through
//! server functions, while the server uses the reqwest adapters in
//! [`services`].

pub mod config;
pub mod debounce;
pub mod error;
pub mod geocode;
#[cfg(feature = "sampling")]
pub mod random;
pub mod route;
pub mod selection;
#[cfg(feature = "remote")]
pub mod services;
pub mod validity;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, RegionConfig, ServiceConfig, TreasureConfig};
pub use debounce::{Cancel, PendingSearch, SEARCH_DEBOUNCE};
pub use error::TreasureError;
pub use geocode::{is_searchable, AddressDetails, GeocodeClient, Geocoder};
#[cfg(feature = "sampling")]
pub use random::RandomPointGenerator;
pub use route::{MapSurface, RenderOutcome, RouteRenderer, RouteService, Viewport, ViewportPolicy};
pub use selection::{Field, SelectionController, Ticket, Transition};
pub use validity::{PointValidator, RegionRules, ValidityChecker, Verdict};

pub use shared_types::{Bounds, Coordinate, CoordinateError, LocationSet, Suggestion};
