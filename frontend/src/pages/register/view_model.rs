use super::utils::RegisterForm;
use crate::{
    access::DASHBOARD_PATH,
    api::{ApiError, RegisterRequest, User},
    state::auth::{self, use_api_client},
    telemetry::AuditLogger,
    utils::navigation,
};
use leptos::*;
use serde_json::json;

#[derive(Clone, Copy)]
pub struct RegisterViewModel {
    pub form: RwSignal<RegisterForm>,
    pub problems: RwSignal<Vec<String>>,
    pub error: RwSignal<Option<ApiError>>,
    pub register_action: Action<RegisterRequest, Result<User, ApiError>>,
    audit: StoredValue<AuditLogger>,
}

impl RegisterViewModel {
    pub fn submit(&self) {
        if self.register_action.pending().get_untracked() {
            return;
        }
        let form = self.form.get_untracked();
        let problems = form.problems();
        self.audit.with_value(|audit| {
            audit.form_submission(
                "register-form",
                &["firstName", "lastName", "email", "password", "confirmPassword"],
                problems.is_empty(),
            )
        });
        self.error.set(None);
        if !problems.is_empty() {
            self.problems.set(problems);
            return;
        }
        self.problems.set(Vec::new());
        self.register_action.dispatch(form.to_request());
    }
}

pub fn use_register_view_model() -> RegisterViewModel {
    let form = create_rw_signal(RegisterForm::default());
    let problems = create_rw_signal(Vec::<String>::new());
    let error = create_rw_signal(None::<ApiError>);
    let register_action = auth::use_register_action();
    let audit = use_api_client().audit().clone();

    {
        let audit = audit.clone();
        create_effect(move |_| {
            if let Some(result) = register_action.value().get() {
                match result {
                    Ok(user) => {
                        form.set(RegisterForm::default());
                        audit.user_action(
                            "Registration Success",
                            "RegisterPage",
                            json!({ "redirectTo": DASHBOARD_PATH, "userId": user.id }),
                        );
                        navigation::redirect_to(DASHBOARD_PATH);
                    }
                    Err(err) => error.set(Some(err)),
                }
            }
        });
    }

    RegisterViewModel {
        form,
        problems,
        error,
        register_action,
        audit: store_value(audit),
    }
}
