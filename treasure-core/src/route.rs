use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use shared_types::{Bounds, Coordinate, LocationSet};

use crate::error::TreasureError;

/// A driving-route provider. Returned geometry is in (lat, lon) order.
pub trait RouteService: Send + Sync {
    fn driving_route(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> impl Future<Output = Result<Vec<Coordinate>, TreasureError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    /// The zoomed-out default view shown when nothing is selected.
    World { center: Coordinate, zoom: f64 },
    FlyTo { center: Coordinate, zoom: f64 },
    FitBounds { bounds: Bounds, padding_px: f64 },
}

/// The drawing side of a map. Holds at most one path overlay, which the
/// renderer always removes before adding a new one.
pub trait MapSurface {
    fn add_path(&self, path: Vec<Coordinate>);
    fn remove_path(&self);
    fn set_viewport(&self, viewport: Viewport);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportPolicy {
    pub world_center: Coordinate,
    pub world_zoom: f64,
    pub single_point_zoom: f64,
    pub fit_padding_px: f64,
}

impl Default for ViewportPolicy {
    fn default() -> Self {
        Self {
            world_center: Coordinate::ORIGIN,
            world_zoom: 2.0,
            single_point_zoom: 13.0,
            fit_padding_px: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Cleared,
    Focused,
    Routed { points: usize },
    StraightLine,
    /// A newer render started while this one waited for its route.
    Superseded,
}

/// Draws the selection onto a [`MapSurface`]: viewport first, then the
/// driving route, falling back to a straight line.
#[derive(Debug, Clone)]
pub struct RouteRenderer<R> {
    routes: R,
    policy: ViewportPolicy,
    generation: Arc<AtomicU64>,
}

impl<R: RouteService> RouteRenderer<R> {
    pub fn new(routes: R, policy: ViewportPolicy) -> Self {
        Self {
            routes,
            policy,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn render<S>(&self, surface: &S, locations: &LocationSet) -> RenderOutcome
    where
        S: MapSurface + ?Sized,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        surface.remove_path();

        match *locations {
            LocationSet::Empty => {
                surface.set_viewport(Viewport::World {
                    center: self.policy.world_center,
                    zoom: self.policy.world_zoom,
                });
                RenderOutcome::Cleared
            }
            LocationSet::Single(point) => {
                surface.set_viewport(Viewport::FlyTo {
                    center: point,
                    zoom: self.policy.single_point_zoom,
                });
                RenderOutcome::Focused
            }
            LocationSet::Pair(start, end) => {
                if let Some(bounds) = Bounds::covering(&[start, end]) {
                    surface.set_viewport(Viewport::FitBounds {
                        bounds,
                        padding_px: self.policy.fit_padding_px,
                    });
                }

                let route = self.routes.driving_route(start, end).await;
                if self.generation.load(Ordering::SeqCst) != generation {
                    tracing::debug!(generation, "dropping route for a superseded selection");
                    return RenderOutcome::Superseded;
                }

                let (path, outcome) = match route {
                    Ok(path) if path.len() >= 2 => {
                        let points = path.len();
                        (path, RenderOutcome::Routed { points })
                    }
                    Ok(_) => {
                        tracing::warn!("route geometry too short, drawing a straight line");
                        (vec![start, end], RenderOutcome::StraightLine)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "error getting route, drawing a straight line");
                        (vec![start, end], RenderOutcome::StraightLine)
                    }
                };

                surface.remove_path();
                surface.add_path(path);
                outcome
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::{coord, FakeRoutes, RecordingSurface};

    fn renderer(routes: FakeRoutes) -> RouteRenderer<FakeRoutes> {
        RouteRenderer::new(routes, ViewportPolicy::default())
    }

    #[tokio::test]
    async fn failing_router_draws_exactly_the_two_points() {
        let start = coord(34.05, -118.24);
        let end = coord(34.06, -118.25);
        let routes = FakeRoutes::failing();
        let surface = RecordingSurface::default();

        let outcome = renderer(routes.clone())
            .render(&surface, &LocationSet::Pair(start, end))
            .await;

        assert_eq!(outcome, RenderOutcome::StraightLine);
        assert_eq!(surface.path(), Some(vec![start, end]));
        assert_eq!(routes.requests(), vec![(start, end)]);
    }

    #[tokio::test]
    async fn route_geometry_becomes_the_path() {
        let start = coord(34.05, -118.24);
        let end = coord(34.06, -118.25);
        let geometry = vec![start, coord(34.055, -118.245), end];
        let surface = RecordingSurface::default();

        let outcome = renderer(FakeRoutes::answering(geometry.clone()))
            .render(&surface, &LocationSet::Pair(start, end))
            .await;

        assert_eq!(outcome, RenderOutcome::Routed { points: 3 });
        assert_eq!(surface.path(), Some(geometry));
        assert!(matches!(
            surface.viewports().as_slice(),
            [Viewport::FitBounds { padding_px, .. }] if *padding_px == 50.0
        ));
    }

    #[tokio::test]
    async fn pair_viewport_covers_both_points_with_padding() {
        let start = coord(34.06, -118.24);
        let end = coord(34.05, -118.25);
        let surface = RecordingSurface::default();

        renderer(FakeRoutes::failing())
            .render(&surface, &LocationSet::Pair(start, end))
            .await;

        assert_eq!(
            surface.viewports(),
            vec![Viewport::FitBounds {
                bounds: Bounds {
                    south_west: coord(34.05, -118.25),
                    north_east: coord(34.06, -118.24),
                },
                padding_px: 50.0,
            }]
        );
    }

    #[tokio::test]
    async fn degenerate_route_falls_back_to_a_straight_line() {
        let start = coord(34.05, -118.24);
        let end = coord(34.06, -118.25);
        let surface = RecordingSurface::default();

        let outcome = renderer(FakeRoutes::answering(vec![start]))
            .render(&surface, &LocationSet::Pair(start, end))
            .await;

        assert_eq!(outcome, RenderOutcome::StraightLine);
        assert_eq!(surface.path(), Some(vec![start, end]));
    }

    #[tokio::test]
    async fn repeated_renders_keep_a_single_path() {
        let pairs = [
            (coord(34.05, -118.24), coord(34.06, -118.25)),
            (coord(40.71, -74.0), coord(40.72, -74.01)),
            (coord(51.5, -0.12), coord(51.51, -0.13)),
        ];
        let renderer = renderer(FakeRoutes::failing());
        let surface = RecordingSurface::default();

        for (start, end) in pairs {
            renderer.render(&surface, &LocationSet::Pair(start, end)).await;
            renderer.render(&surface, &LocationSet::Pair(start, end)).await;
            assert_eq!(surface.live_paths(), 1);
        }
        assert_eq!(surface.max_live_paths(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_route_for_an_old_selection_is_discarded() {
        let first = (coord(34.05, -118.24), coord(34.06, -118.25));
        let second = (coord(34.07, -118.26), coord(34.08, -118.27));
        let slow_route = vec![first.0, coord(34.0, -118.0), first.1];
        let routes = FakeRoutes::scripted(vec![
            (Duration::from_millis(500), Some(slow_route)),
            (Duration::from_millis(10), None),
        ]);
        let renderer = renderer(routes);
        let surface = RecordingSurface::default();

        let older = LocationSet::Pair(first.0, first.1);
        let newer = LocationSet::Pair(second.0, second.1);
        let (old, new) = tokio::join!(
            renderer.render(&surface, &older),
            renderer.render(&surface, &newer),
        );

        assert_eq!(old, RenderOutcome::Superseded);
        assert_eq!(new, RenderOutcome::StraightLine);
        assert_eq!(surface.path(), Some(vec![second.0, second.1]));
        assert_eq!(surface.max_live_paths(), 1);
    }

    #[tokio::test]
    async fn fewer_than_two_points_issue_no_request() {
        let routes = FakeRoutes::failing();
        let renderer = renderer(routes.clone());
        let surface = RecordingSurface::default();

        renderer
            .render(&surface, &LocationSet::Pair(coord(1.0, 1.0), coord(2.0, 2.0)))
            .await;
        assert_eq!(surface.live_paths(), 1);

        let single = coord(34.05, -118.24);
        assert_eq!(
            renderer.render(&surface, &LocationSet::Single(single)).await,
            RenderOutcome::Focused
        );
        assert_eq!(surface.live_paths(), 0);

        assert_eq!(
            renderer.render(&surface, &LocationSet::Empty).await,
            RenderOutcome::Cleared
        );
        assert_eq!(routes.requests().len(), 1);
        assert_eq!(
            surface.viewports().last(),
            Some(&Viewport::World {
                center: coord(0.0, 0.0),
                zoom: 2.0
            })
        );
    }
}
