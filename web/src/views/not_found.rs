use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let navigate = use_navigate();

    view! {
        <div class="not-found">
            <div class="not-found-code">"404"</div>
            <h1>"Off the map"</h1>
            <p>"There is no treasure buried at this address."</p>
            <button
                class="not-found-home"
                on:click=move |_| navigate("/", Default::default())
            >
                "🗺️ Back to the map"
            </button>
        </div>
    }
}
