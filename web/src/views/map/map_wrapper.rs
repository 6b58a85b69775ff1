use leptos::{
    leptos_dom::helpers::set_timeout_with_handle,
    logging::{log, warn},
    prelude::*,
    task::spawn_local,
};
use leptos_leaflet::{leaflet::Map, prelude::*};
use shared_types::{Coordinate, LocationSet};
use thaw::{Button, ButtonAppearance};
use treasure_core::{
    is_searchable, Field, PendingSearch, RouteRenderer, SelectionController, Transition,
    ViewportPolicy, SEARCH_DEBOUNCE,
};

use crate::{
    components::{error::ErrorView, loading::LoadingView, place_search::PlaceSearch},
    server::{random_treasure_pair, search_places},
    views::map::{
        bridge::{LeafletSurface, ServerRoutes, Timer},
        map_renderer::TreasureMapView,
        plugins::download_map,
    },
};

#[component]
pub fn TreasureMapCreator() -> impl IntoView {
    let controller = RwSignal::new(SelectionController::new());
    let locations: Memo<LocationSet> = Memo::new(move |_| *controller.read().locations());

    let path = RwSignal::new(None::<Vec<Coordinate>>);
    let map: JsRwSignal<Option<Map>> = JsRwSignal::new_local(None::<Map>);
    let surface = LeafletSurface::new(path, map);
    let renderer = StoredValue::new(RouteRenderer::new(ServerRoutes, ViewportPolicy::default()));
    let pending = StoredValue::new_local(PendingSearch::<Timer>::default());

    let generating = RwSignal::new(false);
    let notice = RwSignal::new(None::<String>);

    // Every change to the confirmed points is redrawn; older renders drop
    // their route when it arrives late.
    let apply = move |transition: Transition| {
        if let Transition::Changed(next) = transition {
            let renderer = renderer.get_value();
            spawn_local(async move {
                let outcome = renderer.render(&surface, &next).await;
                log!("render finished: {:?}", outcome);
            });
        }
    };

    let on_input = move |field: Field, text: String| {
        let Some((ticket, transition)) = controller.try_update(|c| c.type_query(field, &text))
        else {
            return;
        };
        apply(transition);

        if !is_searchable(&text) {
            pending.update_value(|p| p.cancel(field));
            return;
        }

        let handle = set_timeout_with_handle(
            move || {
                pending.update_value(|p| p.finish(field));
                spawn_local(async move {
                    match search_places(text).await {
                        Ok(found) => controller.update(|c| {
                            if !c.receive_suggestions(ticket, found) {
                                log!("dropping stale suggestions for {:?}", field);
                            }
                        }),
                        Err(e) => warn!("search failed: {}", e),
                    }
                });
            },
            SEARCH_DEBOUNCE,
        );

        match handle {
            Ok(handle) => pending.update_value(|p| p.replace(field, Timer(handle))),
            Err(e) => warn!("could not schedule search: {:?}", e),
        }
    };

    let on_pick = move |field: Field, index: usize| {
        pending.update_value(|p| p.cancel(field));
        if let Some(transition) = controller.try_update(|c| c.pick_suggestion(field, index)) {
            apply(transition);
        }
    };

    let on_pin = move |field: Field| {
        controller.update(|c| {
            if c.pin_field() == Some(field) {
                c.cancel_pin();
            } else {
                c.begin_pin(field);
            }
        });
    };

    let on_map_click = move |point: Coordinate| {
        if let Some(transition) = controller.try_update(|c| c.place_pin(point)) {
            apply(transition);
        }
    };

    let create_map = move |_ev: web_sys::MouseEvent| {
        if let Some(transition) = controller.try_update(|c| c.create_map()) {
            apply(transition);
        }
    };

    let flip = move |_ev: web_sys::MouseEvent| {
        if let Some(transition) = controller.try_update(|c| c.flip()) {
            apply(transition);
        }
    };

    let reset = move |_ev: web_sys::MouseEvent| {
        pending.update_value(|p| {
            p.cancel(Field::Start);
            p.cancel(Field::End);
        });
        notice.set(None);
        if let Some(transition) = controller.try_update(|c| c.reset()) {
            apply(transition);
        }
    };

    let roll_dice = move |_ev: web_sys::MouseEvent| {
        generating.set(true);
        notice.set(None);
        spawn_local(async move {
            match random_treasure_pair().await {
                Ok((start, end)) => {
                    if let Some(transition) = controller.try_update(|c| c.apply_random(start, end)) {
                        apply(transition);
                    }
                }
                Err(e) => {
                    warn!("random generation failed: {}", e);
                    notice.set(Some(
                        "Could not find valid land points. Try rolling again.".to_string(),
                    ));
                }
            }
            generating.set(false);
        });
    };

    view! {
        <div class="treasure-container">
            <div class="search-form">
                <h1>"Treasure Map Creator"</h1>

                <div class="search-inputs">
                    <PlaceSearch
                        field=Field::Start
                        placeholder="Enter starting location"
                        controller=controller
                        on_input=on_input
                        on_pick=on_pick
                        on_pin=on_pin
                    />
                    <PlaceSearch
                        field=Field::End
                        placeholder="Enter treasure location"
                        controller=controller
                        on_input=on_input
                        on_pick=on_pick
                        on_pin=on_pin
                    />
                </div>

                <div class="button-group">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=create_map
                        disabled=Signal::derive(move || !controller.read().can_create_map())
                    >
                        "Create Treasure Map"
                    </Button>
                    <button
                        class="dice-button"
                        title="Generate random nearby locations"
                        on:click=roll_dice
                        disabled=move || generating.get()
                    >
                        "🎲"
                    </button>
                    <button
                        class="dice-button"
                        title="Swap start and treasure"
                        on:click=flip
                        disabled=move || !controller.read().can_flip()
                    >
                        "⇅"
                    </button>
                    <button
                        class="dice-button"
                        title="Download Map"
                        on:click=move |_| download_map()
                        disabled=move || !controller.read().can_download()
                    >
                        "📥"
                    </button>
                    <button class="clear-button" title="Start over" on:click=reset>
                        "Clear"
                    </button>
                </div>

                <Show when=move || generating.get()>
                    <LoadingView message=Some("Looking for buried treasure...".to_string()) />
                </Show>
                {move || notice.get().map(|message| view! { <ErrorView message=Some(message) /> })}
                <Show when=move || controller.read().pin_field().is_some()>
                    <p class="pin-hint">"Click the map to drop your pin"</p>
                </Show>
            </div>

            <div class="map-container">
                <TreasureMapView
                    locations=locations
                    path=path
                    map=map
                    on_map_click=on_map_click
                />
            </div>
        </div>
    }
}
