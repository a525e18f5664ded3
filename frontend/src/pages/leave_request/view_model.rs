use super::{
    repository::LeaveRequestRepository,
    utils::{LeaveFormState, REDIRECT_DELAY_MS, SUCCESS_MESSAGE},
};
use crate::{
    access::DASHBOARD_PATH,
    api::{ApiError, CreateLeaveRequest, LeaveBalance, LeaveRequest},
    state::auth::use_api_client,
    telemetry::AuditLogger,
    utils::navigation,
    validation::{self, DurationCheck},
};
use leptos::*;
use serde_json::json;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct LeaveRequestViewModel {
    pub form: LeaveFormState,
    pub balance_resource: Resource<(), Result<LeaveBalance, ApiError>>,
    pub check: Memo<DurationCheck>,
    pub submit_errors: RwSignal<Vec<String>>,
    pub success: RwSignal<Option<String>>,
    pub submit_error: RwSignal<Option<ApiError>>,
    pub submit_action: Action<CreateLeaveRequest, Result<LeaveRequest, ApiError>>,
    audit: StoredValue<AuditLogger>,
}

impl LeaveRequestViewModel {
    pub fn balance(&self) -> Option<LeaveBalance> {
        self.balance_resource.get().and_then(Result::ok)
    }

    /// Errors from the last submit attempt, otherwise the live ones.
    pub fn messages(&self) -> Vec<String> {
        let submitted = self.submit_errors.get();
        if submitted.is_empty() {
            self.check.get().messages()
        } else {
            submitted
        }
    }

    pub fn submit_disabled(&self) -> bool {
        self.submit_action.pending().get() || !self.check.get().is_clean()
    }

    /// Any edit invalidates the messages of the previous attempt.
    pub fn touch(&self) {
        self.submit_errors.set(Vec::new());
        self.submit_error.set(None);
    }

    pub fn submit(&self) {
        if self.submit_action.pending().get_untracked() {
            return;
        }
        self.success.set(None);
        self.submit_error.set(None);

        let draft = self.form.draft();
        let balance = untrack(|| self.balance_resource.get()).and_then(Result::ok);
        let result = validation::validate_for_submit(&draft, balance.as_ref());
        self.audit.with_value(|audit| {
            audit.form_submission(
                "leave-request-form",
                &["leaveType", "startDate", "endDate", "reason"],
                result.is_ok(),
            )
        });

        match result {
            Ok(payload) => {
                self.submit_errors.set(Vec::new());
                self.submit_action.dispatch(payload);
            }
            Err(errors) => {
                self.submit_errors
                    .set(errors.iter().map(ToString::to_string).collect());
            }
        }
    }

    pub fn reset(&self) {
        self.form.reset();
        self.submit_errors.set(Vec::new());
        self.submit_error.set(None);
        self.success.set(None);
    }
}

pub fn use_leave_request_view_model() -> LeaveRequestViewModel {
    let api = use_api_client();
    let audit = api.audit().clone();
    let repository = LeaveRequestRepository::new_with_client(Rc::new(api));
    let form = LeaveFormState::default();

    let repo = repository.clone();
    let balance_resource = create_resource(
        || (),
        move |_| {
            let repo = repo.clone();
            async move { repo.fetch_balance().await }
        },
    );

    let check = create_memo(move |_| {
        let balance = balance_resource.get().and_then(Result::ok);
        validation::evaluate(&form.draft(), balance.as_ref())
    });

    let repo = repository;
    let submit_action = create_action(move |payload: &CreateLeaveRequest| {
        let repo = repo.clone();
        let payload = payload.clone();
        async move { repo.submit(payload).await }
    });

    let submit_errors = create_rw_signal(Vec::<String>::new());
    let success = create_rw_signal(None::<String>);
    let submit_error = create_rw_signal(None::<ApiError>);

    {
        let audit = audit.clone();
        create_effect(move |_| {
            if let Some(result) = submit_action.value().get() {
                match result {
                    Ok(created) => {
                        audit.user_action(
                            "Leave Request Submitted",
                            "LeaveRequestPage",
                            json!({ "leaveId": created.id, "duration": created.duration }),
                        );
                        form.reset();
                        success.set(Some(SUCCESS_MESSAGE.to_string()));
                        navigation::redirect_after(DASHBOARD_PATH, REDIRECT_DELAY_MS);
                    }
                    Err(err) => submit_error.set(Some(err)),
                }
            }
        });
    }

    LeaveRequestViewModel {
        form,
        balance_resource,
        check,
        submit_errors,
        success,
        submit_error,
        submit_action,
        audit: store_value(audit),
    }
}
