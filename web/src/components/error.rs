use leptos::prelude::*;
use thaw::{MessageBar, MessageBarIntent};

/// Inline notice for failures the user can recover from by trying again.
#[component]
pub fn ErrorView(message: Option<String>) -> impl IntoView {
    view! {
        <div class="treasure-notice">
            <MessageBar intent=MessageBarIntent::Warning>
                {message.unwrap_or_else(|| "Something went wrong. Please try again.".to_string())}
            </MessageBar>
        </div>
    }
}
