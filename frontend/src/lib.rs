use leptos::*;

pub mod access;
pub mod api;
mod components;
pub mod config;
mod pages;
pub mod router;
pub mod state;
pub mod telemetry;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod test_support;

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("Starting LeaveFlow frontend (wasm)");

    // window.__LEAVEFLOW_ENV (env.js) takes precedence over ./config.json.
    spawn_local(config::init());

    router::mount_app();
}
