use leptos::prelude::*;
use thaw::{Spinner, SpinnerSize};

#[component]
pub fn LoadingView(message: Option<String>) -> impl IntoView {
    view! {
        <div class="loading-container">
            <Spinner size=SpinnerSize::Small />
            <span class="loading-message">
                {message.unwrap_or_else(|| "Working...".to_string())}
            </span>
        </div>
    }
}
