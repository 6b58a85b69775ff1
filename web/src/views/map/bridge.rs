//! Browser-side implementations of the core workflow traits.

use leptos::{leptos_dom::helpers::TimeoutHandle, prelude::*};
use leptos_leaflet::{
    leaflet::{LatLng, LatLngBounds, Map},
    prelude::*,
};
use shared_types::{Bounds, Coordinate};
use treasure_core::{Cancel, MapSurface, RouteService, TreasureError, Viewport};
use wasm_bindgen::JsValue;
use web_sys::js_sys::Array;

use crate::{server::driving_route, views::map::plugins::js_object};

fn lat_lng(point: Coordinate) -> LatLng {
    LatLng::new(point.lat(), point.lon())
}

fn lat_lng_bounds(bounds: &Bounds) -> LatLngBounds {
    LatLngBounds::new(&lat_lng(bounds.south_west), &lat_lng(bounds.north_east))
}

/// `{ padding: [p, p] }` for `Map::fitBounds`.
fn fit_options(padding_px: f64) -> JsValue {
    let padding = Array::of2(&JsValue::from_f64(padding_px), &JsValue::from_f64(padding_px));
    js_object(&[("padding", padding.into())])
}

/// The Leaflet map as seen by the route renderer. The path lives in a
/// signal so the view owns the single `Polyline`; viewport changes go
/// straight to the map.
#[derive(Clone, Copy)]
pub struct LeafletSurface {
    path: RwSignal<Option<Vec<Coordinate>>>,
    map: JsRwSignal<Option<Map>>,
}

impl LeafletSurface {
    pub fn new(path: RwSignal<Option<Vec<Coordinate>>>, map: JsRwSignal<Option<Map>>) -> Self {
        Self { path, map }
    }
}

impl MapSurface for LeafletSurface {
    fn add_path(&self, path: Vec<Coordinate>) {
        self.path.set(Some(path));
    }

    fn remove_path(&self) {
        self.path.set(None);
    }

    fn set_viewport(&self, viewport: Viewport) {
        let Some(map) = self.map.get_untracked() else {
            leptos::logging::warn!("map not ready, skipping viewport change");
            return;
        };

        match viewport {
            Viewport::World { center, zoom } => {
                map.set_view(&lat_lng(center), zoom);
            }
            Viewport::FlyTo { center, zoom } => {
                map.fly_to(&lat_lng(center), zoom);
            }
            Viewport::FitBounds { bounds, padding_px } => {
                map.fit_bounds_with_options(&lat_lng_bounds(&bounds), &fit_options(padding_px));
            }
        }
    }
}

/// Reaches the routing service through the `driving_route` server function.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerRoutes;

impl RouteService for ServerRoutes {
    async fn driving_route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Vec<Coordinate>, TreasureError> {
        driving_route(start, end)
            .await
            .map_err(|e| TreasureError::Upstream(e.to_string()))
    }
}

/// Debounce timer for one search field.
pub struct Timer(pub TimeoutHandle);

impl Cancel for Timer {
    fn cancel(self) {
        self.0.clear();
    }
}
