use super::utils::LoginFormState;
use crate::{
    access,
    api::{ApiError, LoginRequest, User},
    state::auth::{self, use_api_client},
    telemetry::AuditLogger,
    utils::navigation,
};
use leptos::*;
use serde_json::json;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub login_action: Action<LoginRequest, Result<User, ApiError>>,
    audit: StoredValue<AuditLogger>,
}

impl LoginViewModel {
    pub fn submit(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        let email = self.form.email.get_untracked();
        let password = self.form.password.get_untracked();
        let validation = super::utils::validate_credentials(&email, &password);

        self.audit.with_value(|audit| {
            audit.form_submission("login-form", &["email", "password"], validation.is_ok())
        });

        if let Err(msg) = validation {
            self.error.set(Some(ApiError::validation(msg)));
            return;
        }
        self.error.set(None);
        self.login_action.dispatch(LoginRequest {
            email: email.trim().to_string(),
            password,
        });
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let form = LoginFormState::default();
    let error = create_rw_signal(None::<ApiError>);
    let login_action = auth::use_login_action();
    let audit = use_api_client().audit().clone();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(user) => {
                    error.set(None);
                    form.password.set(String::new());
                    let target = access::resolve_return_target(
                        navigation::current_query_param("returnUrl").as_deref(),
                    );
                    audit.user_action(
                        "Login Success",
                        "LoginPage",
                        json!({ "redirectTo": target, "userRole": user.role.as_str() }),
                    );
                    navigation::redirect_to(&target);
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    LoginViewModel {
        form,
        error,
        login_action,
        audit: store_value(use_api_client().audit().clone()),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn login_view_model_defaults_empty() {
        with_runtime(|| {
            let vm = use_login_view_model();
            assert!(vm.error.get().is_none());
            assert!(vm.form.email.get().is_empty());
            assert!(!vm.form.show_password.get());
        });
    }

    #[test]
    fn invalid_credentials_are_reported_without_dispatch() {
        with_runtime(|| {
            let vm = use_login_view_model();
            vm.form.email.set("not-an-email".into());
            vm.form.password.set("secret".into());
            vm.submit();
            let err = vm.error.get().expect("validation error");
            assert_eq!(err.code, "VALIDATION_ERROR");
            assert_eq!(vm.login_action.version().get_untracked(), 0);
        });
    }
}
