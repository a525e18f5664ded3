use reqwest::Method;
use serde_json::json;

use super::{
    client::ApiClient,
    types::{ApiError, AuthResponse, LoginRequest, RegisterRequest, User},
};
use crate::telemetry::AuditCategory;

impl ApiClient {
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, ApiError> {
        let result: Result<AuthResponse, ApiError> =
            self.send_json(Method::POST, "/auth/login", &request).await;
        self.finish_authentication("Login Attempt", &request.email, result)
    }

    /// Registers a new account and signs it in. A missing role defaults to
    /// `EMPLOYEE` through [`RegisterRequest`]'s constructor.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, ApiError> {
        let result: Result<AuthResponse, ApiError> =
            self.send_json(Method::POST, "/auth/register", &request).await;
        self.finish_authentication("Registration Attempt", &request.email, result)
    }

    fn finish_authentication(
        &self,
        action: &str,
        email: &str,
        result: Result<AuthResponse, ApiError>,
    ) -> Result<AuthResponse, ApiError> {
        match result {
            Ok(response) => {
                self.session()
                    .set_session(&response.token, &response.user)
                    .map_err(|e| ApiError::unknown(e.to_string()))?;
                self.audit().auth_attempt(action, email, true, None);
                self.audit().set_user_id(response.user.id);
                Ok(response)
            }
            Err(err) => {
                self.audit().auth_attempt(action, email, false, Some(&err.error));
                Err(err)
            }
        }
    }

    /// Local only: the backend keeps no server-side session.
    pub fn logout(&self) {
        let user_id = self.current_user().map(|user| user.id);
        self.audit().info(
            AuditCategory::Auth,
            "User Logged Out",
            json!({ "userId": user_id }),
        );
        self.session().clear_session();
        self.audit().clear_user_id();
    }

    pub fn current_user(&self) -> Option<User> {
        self.session().get_current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    pub async fn test_connection(&self) -> bool {
        let connected = matches!(self.probe("/auth/test").await, Ok(status) if status.is_success());
        let base_url = self.resolved_base_url().await;
        if connected {
            self.audit().info(
                AuditCategory::Api,
                "Connection Test Result",
                json!({ "connected": true, "baseUrl": base_url }),
            );
        } else {
            self.audit().warn(
                AuditCategory::Api,
                "Backend Connection Failed",
                json!({ "baseUrl": base_url }),
            );
        }
        connected
    }
}
