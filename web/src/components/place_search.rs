use leptos::prelude::*;
use treasure_core::{Field, SelectionController};
use web_sys::KeyboardEvent;

/// One search field of the treasure form: text input, suggestion list and
/// a pin button for placing the point by clicking the map.
#[component]
pub fn PlaceSearch<I, P, M>(
    field: Field,
    placeholder: &'static str,
    controller: RwSignal<SelectionController>,
    on_input: I,
    on_pick: P,
    on_pin: M,
) -> impl IntoView
where
    I: Fn(Field, String) + 'static + Copy + Send + Sync,
    P: Fn(Field, usize) + 'static + Copy + Send + Sync,
    M: Fn(Field) + 'static + Copy + Send + Sync,
{
    let selected_index = RwSignal::new(0usize);
    let query = Memo::new(move |_| controller.read().query(field).to_string());
    let suggestions = Memo::new(move |_| controller.read().suggestions(field).to_vec());
    let pinning = Memo::new(move |_| controller.read().pin_field() == Some(field));

    let handle_keydown = move |ev: KeyboardEvent| match ev.key().as_str() {
        "Enter" => {
            if !suggestions.read().is_empty() {
                ev.prevent_default();
                on_pick(field, selected_index.get());
                selected_index.set(0);
            }
        }
        "ArrowDown" => {
            ev.prevent_default();
            let max = suggestions.read().len().saturating_sub(1);
            selected_index.update(|i| *i = (*i + 1).min(max));
        }
        "ArrowUp" => {
            ev.prevent_default();
            selected_index.update(|i| *i = i.saturating_sub(1));
        }
        "Escape" => {
            controller.update(|c| c.dismiss_suggestions(field));
            selected_index.set(0);
        }
        _ => {}
    };

    let handle_input = move |ev: web_sys::Event| {
        selected_index.set(0);
        on_input(field, event_target_value(&ev));
    };

    view! {
        <div class="place-search">
            <div class="place-search-input-wrapper">
                <input
                    type="text"
                    class="place-search-input"
                    placeholder=placeholder
                    prop:value=move || query.get()
                    on:input=handle_input
                    on:keydown=handle_keydown
                />
                <button
                    class="place-search-pin-button"
                    class:armed=move || pinning.get()
                    title="Click the map to place this point"
                    on:click=move |_| on_pin(field)
                >
                    "📍"
                </button>
            </div>

            <Show when=move || !suggestions.read().is_empty()>
                <ul class="suggestions-list">
                    {move || suggestions.get().into_iter().enumerate().map(|(idx, suggestion)| {
                        view! {
                            <li
                                class="suggestion-item"
                                class:selected=move || selected_index.get() == idx
                                data-place-id=suggestion.id
                                on:mousedown=move |_| on_pick(field, idx)
                                on:mouseenter=move |_| selected_index.set(idx)
                            >
                                {suggestion.label}
                            </li>
                        }
                    }).collect_view()}
                </ul>
            </Show>
        </div>
    }
}
