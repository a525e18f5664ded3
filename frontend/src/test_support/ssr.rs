use leptos::*;

use crate::api::{ApiClient, User};
use crate::state::session::MemorySessionStore;
use std::rc::Rc;

pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    result
}

/// Like [`with_runtime`], but resources never start loading.
pub fn with_suppressed_resources<T>(f: impl FnOnce() -> T) -> T {
    leptos_reactive::suppress_resource_load(true);
    let result = with_runtime(f);
    leptos_reactive::suppress_resource_load(false);
    result
}

pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    leptos_reactive::suppress_resource_load(true);
    let html = with_runtime(|| view().into_view().render_to_string().to_string());
    leptos_reactive::suppress_resource_load(false);
    html
}

/// Renders `view` with an [`ApiClient`] in context whose session holds `user`.
pub fn render_signed_in<F, N>(user: Option<User>, view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    render_to_string(move || {
        let store = match user {
            Some(user) => MemorySessionStore::with_session("test-token", user),
            None => MemorySessionStore::new(),
        };
        provide_context(ApiClient::new_with_base_url("http://ssr.test/api").with_session(Rc::new(store)));
        view()
    })
}
