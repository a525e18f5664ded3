/// Full page navigation. Outside the browser this only logs.
pub fn redirect_to(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if window.location().set_href(path).is_err() {
                log::warn!("failed to navigate to {}", path);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        log::debug!("navigation to {} skipped outside the browser", path);
    }
}

pub fn current_path() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().and_then(|window| window.location().pathname().ok())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Like [`redirect_to`] but a no-op when already on `path`.
pub fn redirect_unless_on(path: &str) {
    if current_path().as_deref() == Some(path) {
        return;
    }
    redirect_to(path);
}

/// Navigates to `path` once `millis` have elapsed.
pub fn redirect_after(path: &str, millis: u32) {
    #[cfg(target_arch = "wasm32")]
    {
        let path = path.to_string();
        gloo_timers::callback::Timeout::new(millis, move || redirect_to(&path)).forget();
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        log::debug!("delayed navigation to {} ({} ms) skipped", path, millis);
    }
}

/// First value of `key` in a raw `?a=b&c=d` query string, percent-decoded.
pub fn query_param(search: &str, key: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == key)
        .map(|(_, value)| {
            percent_encoding::percent_decode_str(&value.replace('+', " "))
                .decode_utf8_lossy()
                .into_owned()
        })
}

/// Raw `location.search`, `None` outside the browser.
pub fn current_search() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().and_then(|window| window.location().search().ok())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

pub fn current_query_param(key: &str) -> Option<String> {
    query_param(&current_search()?, key)
}
