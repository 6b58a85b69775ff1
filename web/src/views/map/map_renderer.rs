use leptos::prelude::*;
use leptos_leaflet::{
    leaflet::{Map, MouseEvent},
    prelude::*,
};
use shared_types::{Coordinate, LocationSet};
use thaw::{Label, LabelSize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::EventTarget;

use crate::views::map::plugins::add_compass;

const WATERCOLOR_TILES: &str = "https://tiles.stadiamaps.com/tiles/stamen_watercolor/{z}/{x}/{y}.jpg";

fn emoji_icon(glyph: &str) -> String {
    format!(
        "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 200 200'%3E%3Ctext x='100' y='100' text-anchor='middle' dominant-baseline='middle' font-size='160px'%3E{}%3C/text%3E%3C/svg%3E",
        glyph
    )
}

fn to_position(point: &Coordinate) -> Position {
    Position::new(point.lat(), point.lon())
}

#[component]
pub fn TreasureMapView<F>(
    locations: Memo<LocationSet>,
    path: RwSignal<Option<Vec<Coordinate>>>,
    map: JsRwSignal<Option<Map>>,
    on_map_click: F,
) -> impl IntoView
where
    F: Fn(Coordinate) + 'static + Copy + Send + Sync,
{
    // Leaflet's Evented exposes addEventListener as an alias of `on`.
    Effect::new(move |_| {
        let Some(map_instance) = map.get() else {
            return;
        };

        add_compass(&map_instance);

        let cb: Closure<dyn FnMut(JsValue)> = Closure::wrap(Box::new(move |event: JsValue| {
            let event: MouseEvent = event.unchecked_into();
            let clicked = event.lat_lng();
            match Coordinate::new(clicked.lat(), clicked.lng()) {
                Ok(point) => on_map_click(point),
                Err(e) => leptos::logging::warn!("ignoring map click: {}", e),
            }
        }));

        let raw_map: &EventTarget = map_instance.unchecked_ref();
        if raw_map
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .is_err()
        {
            leptos::logging::warn!("failed to attach map click listener");
        }

        cb.forget();
    });

    view! {
        <MapContainer
            style="height: 100%; width: 100%; flex: 1"
            center=Position::new(37.7749, -122.4194)
            zoom=12.0
            set_view=true
            map=map.write_only()
        >
            <TileLayer
                url=WATERCOLOR_TILES
                attribution="Map tiles by <a href=\"http://stamen.com\">Stamen Design</a>, &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
            />
            {move || {
                locations.get().points().into_iter().enumerate().map(|(index, point)| {
                    let (glyph, title, caption) = if index == 0 {
                        ("🦢", "Starting Point", "Your journey begins here...")
                    } else {
                        ("❌", "Treasure Location", "X marks the spot!")
                    };

                    view! {
                        <Marker
                            position=to_position(&point)
                            draggable=false
                            icon_url=Some(emoji_icon(glyph))
                            icon_size=Some((48.0, 48.0))
                            icon_anchor=Some((24.0, 48.0))
                        >
                            <Popup>
                                <Label size=LabelSize::Large>{title}</Label>
                                <p><em>{caption}</em></p>
                            </Popup>
                        </Marker>
                    }
                }).collect_view()
            }}
            {move || path.get().map(|points| {
                let positions = points.iter().map(to_position).collect::<Vec<_>>();
                view! {
                    <Polyline
                        positions=positions
                        color="black"
                        weight=6.0
                        dash_array="10, 10"
                        opacity=0.9
                    />
                }
            })}
        </MapContainer>
    }
}
