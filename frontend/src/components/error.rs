use crate::api::ApiError;
use leptos::*;

/// Hint shown under gateway errors the user can act on.
pub fn retry_hint(code: &str) -> Option<&'static str> {
    match code {
        "REQUEST_FAILED" => Some("Check your connection and try again."),
        "SERVER_ERROR" | "UNKNOWN" => Some("Please try again in a moment."),
        "UNAUTHORIZED" => Some("Please sign in again."),
        _ => None,
    }
}

#[component]
pub fn InlineErrorMessage(#[prop(into)] error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2" role="alert">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || {
                    error
                        .get()
                        .and_then(|e| retry_hint(&e.code))
                        .map(|hint| view! { <div class="text-xs opacity-75">{hint}</div> })
                }}
            </div>
        </Show>
    }
}
