use super::{
    repository::AdminLeavesRepository,
    utils::{review_order, LeaveFilter},
};
use crate::{
    api::{ApiError, DecideLeaveRequest, LeaveRequest, LeaveStatus},
    pages::admin::{
        utils::{decision_message, MessageState},
        view_model::DecisionInput,
    },
    state::auth::use_api_client,
    telemetry::AuditLogger,
};
use leptos::*;
use serde_json::json;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct AdminLeavesViewModel {
    pub reload: RwSignal<u32>,
    pub status: RwSignal<Option<LeaveStatus>>,
    pub leaves_resource: Resource<(u32, Option<LeaveStatus>), Result<Vec<LeaveRequest>, ApiError>>,
    pub filter: RwSignal<LeaveFilter>,
    pub visible: Memo<Vec<LeaveRequest>>,
    pub selected: RwSignal<Option<LeaveRequest>>,
    pub rejecting: RwSignal<Option<LeaveRequest>>,
    pub reject_comment: RwSignal<String>,
    pub processing: RwSignal<Option<i64>>,
    pub decide_action: Action<DecisionInput, Result<LeaveRequest, ApiError>>,
    pub messages: RwSignal<MessageState>,
    audit: StoredValue<AuditLogger>,
}

impl AdminLeavesViewModel {
    pub fn refresh(&self) {
        self.messages.update(MessageState::clear);
        self.reload.update(|value| *value = value.wrapping_add(1));
    }

    pub fn clear_filters(&self) {
        self.status.set(None);
        self.filter.set(LeaveFilter::default());
    }

    fn dispatch(&self, leave: LeaveRequest, status: LeaveStatus, comments: Option<String>) {
        if !leave.status.can_transition_to(status) || self.decide_action.pending().get_untracked()
        {
            return;
        }
        self.audit.with_value(|audit| {
            audit.user_action(
                "Leave Decision",
                "AdminLeavesPage",
                json!({ "leaveId": leave.id, "status": status.as_str() }),
            )
        });
        self.processing.set(Some(leave.id));
        self.decide_action
            .dispatch((leave, DecideLeaveRequest { status, comments }));
    }

    pub fn approve(&self, leave: LeaveRequest) {
        self.dispatch(leave, LeaveStatus::Approved, None);
    }

    pub fn open_reject(&self, leave: LeaveRequest) {
        self.reject_comment.set(String::new());
        self.rejecting.set(Some(leave));
    }

    pub fn cancel_reject(&self) {
        self.rejecting.set(None);
    }

    pub fn confirm_reject(&self) {
        let Some(leave) = self.rejecting.get_untracked() else {
            return;
        };
        let comment = self.reject_comment.get_untracked();
        let comment = comment.trim();
        self.rejecting.set(None);
        self.dispatch(
            leave,
            LeaveStatus::Rejected,
            (!comment.is_empty()).then(|| comment.to_string()),
        );
    }
}

pub fn use_admin_leaves_view_model() -> AdminLeavesViewModel {
    let api = use_api_client();
    let audit = api.audit().clone();
    let repository = AdminLeavesRepository::new_with_client(Rc::new(api));
    let reload = create_rw_signal(0u32);
    let status = create_rw_signal(None::<LeaveStatus>);

    let repo = repository.clone();
    let leaves_resource = create_resource(
        move || (reload.get(), status.get()),
        move |(_, status)| {
            let repo = repo.clone();
            async move { repo.fetch_leaves(status).await }
        },
    );

    let filter = create_rw_signal(LeaveFilter::default());
    let visible = create_memo(move |_| {
        let leaves = leaves_resource
            .get()
            .and_then(Result::ok)
            .unwrap_or_default();
        filter.with(|filter| review_order(&leaves, filter))
    });

    let decide_action = create_action(move |(leave, decision): &DecisionInput| {
        let repo = repository.clone();
        let id = leave.id;
        let decision = decision.clone();
        async move { repo.decide(id, decision).await }
    });

    let messages = create_rw_signal(MessageState::default());
    let processing = create_rw_signal(None::<i64>);

    create_effect(move |_| {
        if let Some(result) = decide_action.value().get() {
            processing.set(None);
            match result {
                Ok(updated) => {
                    messages.update(|state| {
                        state.set_success(decision_message(updated.status, &updated))
                    });
                    reload.update(|value| *value = value.wrapping_add(1));
                }
                Err(err) => messages.update(|state| state.set_error(err.error)),
            }
        }
    });

    AdminLeavesViewModel {
        reload,
        status,
        leaves_resource,
        filter,
        visible,
        selected: create_rw_signal(None),
        rejecting: create_rw_signal(None),
        reject_comment: create_rw_signal(String::new()),
        processing,
        decide_action,
        messages,
        audit: store_value(audit),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::LeaveType;
    use crate::test_support::helpers::leave_json;
    use crate::test_support::ssr::with_suppressed_resources;

    #[test]
    fn decided_requests_are_not_redecided() {
        with_suppressed_resources(|| {
            let vm = use_admin_leaves_view_model();
            let approved: LeaveRequest =
                serde_json::from_value(leave_json(8, "ANNUAL", "APPROVED")).unwrap();
            vm.approve(approved);
            assert!(vm.processing.get_untracked().is_none());
            assert_eq!(vm.decide_action.version().get_untracked(), 0);
        });
    }

    #[test]
    fn clear_filters_resets_status_and_search() {
        with_suppressed_resources(|| {
            let vm = use_admin_leaves_view_model();
            vm.status.set(Some(LeaveStatus::Pending));
            vm.filter.update(|f| f.leave_type = Some(LeaveType::Sick));
            vm.clear_filters();
            assert!(vm.status.get_untracked().is_none());
            assert_eq!(vm.filter.get_untracked(), LeaveFilter::default());
        });
    }
}
