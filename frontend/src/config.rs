use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
mod globals {
    use super::RuntimeConfig;
    use wasm_bindgen::JsValue;

    fn read_key(global: &str, keys: [&str; 2]) -> Option<String> {
        let window = web_sys::window()?;
        let any = js_sys::Reflect::get(&window, &global.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        let obj = js_sys::Object::from(any);
        keys.into_iter().find_map(|key| {
            js_sys::Reflect::get(&obj, &key.into())
                .ok()
                .and_then(|value| value.as_string())
                .filter(|value| !value.trim().is_empty())
        })
    }

    // window.__LEAVEFLOW_ENV = { API_BASE_URL: "..." }
    pub fn from_env() -> Option<String> {
        read_key("__LEAVEFLOW_ENV", ["API_BASE_URL", "api_base_url"])
    }

    // window.__LEAVEFLOW_CONFIG = { api_base_url: "..." }
    pub fn from_window_config() -> Option<String> {
        read_key("__LEAVEFLOW_CONFIG", ["api_base_url", "API_BASE_URL"])
    }

    pub fn write_window_config(cfg: &RuntimeConfig) {
        let (Some(window), Some(url)) = (web_sys::window(), cfg.api_base_url.as_ref()) else {
            return;
        };
        let obj = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&obj, &"api_base_url".into(), &JsValue::from_str(url));
        let _ = js_sys::Reflect::set(&window, &"__LEAVEFLOW_CONFIG".into(), &obj);
    }

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        let origin = web_sys::window()?.location().origin().ok()?;
        let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<RuntimeConfig>().await.ok()
    }
}

#[cfg(target_arch = "wasm32")]
fn snapshot_from_globals() -> Option<String> {
    globals::from_env().or_else(globals::from_window_config)
}

#[cfg(not(target_arch = "wasm32"))]
fn snapshot_from_globals() -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
async fn load_runtime_config() -> Option<RuntimeConfig> {
    let cfg = globals::fetch_runtime_config().await?;
    globals::write_window_config(&cfg);
    Some(cfg)
}

#[cfg(not(target_arch = "wasm32"))]
async fn load_runtime_config() -> Option<RuntimeConfig> {
    None
}

fn normalize(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn cache_base_url(value: &str) -> String {
    let value = normalize(value);
    let _ = API_BASE_URL.set(value.clone());
    API_BASE_URL.get().cloned().unwrap_or(value)
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    if let Some(existing) = snapshot_from_globals() {
        return cache_base_url(&existing);
    }
    if let Some(url) = load_runtime_config()
        .await
        .and_then(|cfg| cfg.api_base_url)
        .filter(|url| !url.trim().is_empty())
    {
        return cache_base_url(&url);
    }
    log::debug!("falling back to default API base URL");
    cache_base_url(DEFAULT_API_BASE_URL)
}

pub async fn init() {
    let base = await_api_base_url().await;
    log::info!("API base URL resolved to {}", base);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_slash_and_whitespace() {
        assert_eq!(normalize(" http://api.test/api/ "), "http://api.test/api");
        assert_eq!(normalize(DEFAULT_API_BASE_URL), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn runtime_config_deserializes_optional_url() {
        let cfg: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert!(cfg.api_base_url.is_none());
        let cfg: RuntimeConfig =
            serde_json::from_str(r#"{"api_base_url":"https://x.test/api"}"#).unwrap();
        assert_eq!(cfg.api_base_url.as_deref(), Some("https://x.test/api"));
    }
}
