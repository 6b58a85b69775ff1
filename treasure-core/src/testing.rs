//! In-memory stand-ins for the external services, shared by unit tests.

use std::{
    cell::RefCell,
    collections::{BTreeMap, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use shared_types::{Coordinate, Suggestion};

use crate::{
    error::TreasureError,
    geocode::{AddressDetails, Geocoder},
    route::{MapSurface, RouteService, Viewport},
    validity::PointValidator,
};

pub fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

pub fn address(pairs: &[(&str, &str)]) -> AddressDetails {
    AddressDetails {
        display_name: None,
        components: Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        ),
    }
}

#[derive(Default)]
struct GeocoderState {
    results: Vec<Suggestion>,
    fail: bool,
    queries: Mutex<Vec<String>>,
    reverse_replies: Mutex<VecDeque<Option<AddressDetails>>>,
    reverse_calls: AtomicUsize,
}

#[derive(Clone, Default)]
pub struct FakeGeocoder {
    state: Arc<GeocoderState>,
}

impl FakeGeocoder {
    pub fn with_results(results: Vec<Suggestion>) -> Self {
        Self {
            state: Arc::new(GeocoderState {
                results,
                ..Default::default()
            }),
        }
    }

    pub fn failing() -> Self {
        Self {
            state: Arc::new(GeocoderState {
                fail: true,
                ..Default::default()
            }),
        }
    }

    /// Reverse lookups answer from this queue in order; `None` is a
    /// transport failure. An exhausted queue fails too.
    pub fn with_reverse_replies(replies: Vec<Option<AddressDetails>>) -> Self {
        Self {
            state: Arc::new(GeocoderState {
                reverse_replies: Mutex::new(replies.into()),
                ..Default::default()
            }),
        }
    }

    pub fn los_angeles() -> Suggestion {
        Suggestion {
            id: "298088".to_string(),
            label: "Los Angeles, Los Angeles County, California, United States".to_string(),
            coordinate: coord(34.0536909, -118.242766),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.state.queries.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> usize {
        self.state.queries.lock().unwrap().len()
    }

    pub fn reverse_calls(&self) -> usize {
        self.state.reverse_calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for FakeGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, TreasureError> {
        self.state.queries.lock().unwrap().push(query.to_string());
        if self.state.fail {
            return Err(TreasureError::Status {
                service: "fake",
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(self.state.results.clone())
    }

    async fn reverse(&self, _point: Coordinate) -> Result<AddressDetails, TreasureError> {
        self.state.reverse_calls.fetch_add(1, Ordering::SeqCst);
        match self.state.reverse_replies.lock().unwrap().pop_front() {
            Some(Some(details)) => Ok(details),
            _ => Err(TreasureError::Upstream("connection reset".to_string())),
        }
    }
}

/// Validator that answers from a script, then rejects everything.
#[derive(Clone, Default)]
pub struct ScriptedValidator {
    replies: Arc<Mutex<VecDeque<bool>>>,
    checked: Arc<Mutex<Vec<Coordinate>>>,
}

impl ScriptedValidator {
    pub fn new(replies: Vec<bool>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            checked: Arc::default(),
        }
    }

    pub fn checked(&self) -> Vec<Coordinate> {
        self.checked.lock().unwrap().clone()
    }
}

impl PointValidator for ScriptedValidator {
    async fn is_acceptable(&self, point: Coordinate) -> bool {
        self.checked.lock().unwrap().push(point);
        self.replies.lock().unwrap().pop_front().unwrap_or(false)
    }
}

/// Routing service answering each call from a queue of `(delay, reply)`.
#[derive(Clone, Default)]
pub struct FakeRoutes {
    replies: Arc<Mutex<VecDeque<(Duration, Option<Vec<Coordinate>>)>>>,
    requests: Arc<Mutex<Vec<(Coordinate, Coordinate)>>>,
}

impl FakeRoutes {
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn answering(path: Vec<Coordinate>) -> Self {
        Self::scripted(vec![(Duration::ZERO, Some(path))])
    }

    pub fn scripted(replies: Vec<(Duration, Option<Vec<Coordinate>>)>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<(Coordinate, Coordinate)> {
        self.requests.lock().unwrap().clone()
    }
}

impl RouteService for FakeRoutes {
    async fn driving_route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Vec<Coordinate>, TreasureError> {
        self.requests.lock().unwrap().push((start, end));
        let next = self.replies.lock().unwrap().pop_front();
        let (delay, reply) = next.unwrap_or((Duration::ZERO, None));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply.ok_or(TreasureError::MissingRoute)
    }
}

/// Map surface that behaves like a Leaflet layer group: every `add_path`
/// adds an overlay, `remove_path` removes the current one.
#[derive(Default)]
pub struct RecordingSurface {
    live: RefCell<Vec<Vec<Coordinate>>>,
    max_live: RefCell<usize>,
    viewports: RefCell<Vec<Viewport>>,
}

impl RecordingSurface {
    pub fn path(&self) -> Option<Vec<Coordinate>> {
        self.live.borrow().last().cloned()
    }

    pub fn live_paths(&self) -> usize {
        self.live.borrow().len()
    }

    pub fn max_live_paths(&self) -> usize {
        *self.max_live.borrow()
    }

    pub fn viewports(&self) -> Vec<Viewport> {
        self.viewports.borrow().clone()
    }
}

impl MapSurface for RecordingSurface {
    fn add_path(&self, path: Vec<Coordinate>) {
        let mut live = self.live.borrow_mut();
        live.push(path);
        let mut max = self.max_live.borrow_mut();
        *max = (*max).max(live.len());
    }

    fn remove_path(&self) {
        self.live.borrow_mut().pop();
    }

    fn set_viewport(&self, viewport: Viewport) {
        self.viewports.borrow_mut().push(viewport);
    }
}
