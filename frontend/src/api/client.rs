use std::rc::Rc;

use reqwest::{header, Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

use crate::{
    api::types::ApiError,
    config,
    state::session::{default_session_store, SessionStore},
    telemetry::{AuditCategory, AuditLogger},
    utils::navigation,
};

/// Backend gateway. Cheap to clone; clones share the session store and audit
/// logger.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    session: Rc<dyn SessionStore>,
    audit: AuditLogger,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            session: default_session_store(),
            audit: AuditLogger::default(),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::new()
        }
    }

    pub fn with_session(mut self, session: Rc<dyn SessionStore>) -> Self {
        self.session = session;
        self
    }

    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = audit;
        self
    }

    pub fn session(&self) -> Rc<dyn SessionStore> {
        Rc::clone(&self.session)
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    fn handle_unauthorized_status(&self, status: StatusCode, had_token: bool) {
        if status != StatusCode::UNAUTHORIZED || !had_token {
            return;
        }
        self.session.clear_session();
        self.audit.warn(
            AuditCategory::Auth,
            "Session Rejected By Server",
            json!({ "status": status.as_u16() }),
        );
        self.audit.clear_user_id();
        navigation::redirect_unless_on("/login");
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.resolved_base_url().await, path);
        let token = self.session.get_token();

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header(header::ACCEPT, "application/json");
        if let Some(token) = token.as_deref() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let request = builder
            .build()
            .map_err(|e| ApiError::request_failed(format!("Invalid request: {}", e)))?;

        let started = now_ms();
        let result = self.execute(request).await;
        let elapsed = now_ms() - started;

        match result {
            Ok(response) => {
                let status = response.status();
                self.audit
                    .api_call(method.as_str(), &url, Some(status.as_u16()), elapsed, None);
                self.handle_unauthorized_status(status, token.is_some());
                Ok(response)
            }
            Err(err) => {
                self.audit
                    .api_call(method.as_str(), &url, None, elapsed, Some(&err.error));
                Err(err)
            }
        }
    }

    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response, ApiError> {
        #[cfg(all(test, not(target_arch = "wasm32")))]
        {
            if let Some(responder) = mock_hooks::lookup(request.url().as_str()) {
                return responder.respond(&request).map(MockResponse::into_response);
            }
        }
        self.client
            .execute(request)
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        Self::map_json_response(response).await
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(method, path, Some(body)).await?;
        Self::map_json_response(response).await
    }

    pub(crate) async fn send_empty(&self, method: Method, path: &str) -> Result<(), ApiError> {
        let response = self.send::<()>(method, path, None).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::map_error_response(response).await)
        }
    }

    /// Status-only probe; the body is ignored.
    pub(crate) async fn probe(&self, path: &str) -> Result<StatusCode, ApiError> {
        self.send::<()>(Method::GET, path, None)
            .await
            .map(|response| response.status())
    }

    async fn map_json_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::map_error_response(response).await)
        }
    }

    async fn map_error_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        error_from_body(status, &body)
    }
}

fn now_ms() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64
}

fn default_status_message(status: u16) -> String {
    match status {
        401 => "Authentication required".into(),
        403 => "You do not have permission to perform this action".into(),
        404 => "The requested resource was not found".into(),
        _ => format!("Server error ({})", status),
    }
}

/// Builds an [`ApiError`] from a non-2xx body, preferring the server's
/// `message` (or `error`) field.
pub(crate) fn error_from_body(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error"].iter().find_map(|key| {
                value
                    .get(*key)
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
        })
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| default_status_message(status));
    ApiError::from_status(status, message)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
pub(crate) use mock_hooks::{register_mock, MockResponse, TestResponder};
