use super::{
    repository::AdminRepository,
    utils::{
        decision_message, recent_activity, system_stats, MessageState, SystemStats, ACTIVITY_LIMIT,
    },
};
use crate::{
    api::{AdminStats, ApiError, DecideLeaveRequest, LeaveRequest, LeaveStatus},
    state::auth::use_api_client,
    telemetry::AuditLogger,
    utils::time::today,
};
use leptos::*;
use serde_json::json;
use std::rc::Rc;

pub type DecisionInput = (LeaveRequest, DecideLeaveRequest);

#[derive(Clone, Copy)]
pub struct AdminViewModel {
    pub reload: RwSignal<u32>,
    pub stats_resource: Resource<u32, Result<AdminStats, ApiError>>,
    pub pending_resource: Resource<u32, Result<Vec<LeaveRequest>, ApiError>>,
    pub stats: Memo<SystemStats>,
    pub activity: Memo<Vec<LeaveRequest>>,
    pub rejecting: RwSignal<Option<LeaveRequest>>,
    pub reject_comment: RwSignal<String>,
    pub processing: RwSignal<Option<i64>>,
    pub decide_action: Action<DecisionInput, Result<LeaveRequest, ApiError>>,
    pub messages: RwSignal<MessageState>,
    audit: StoredValue<AuditLogger>,
}

impl AdminViewModel {
    pub fn refresh(&self) {
        self.messages.update(MessageState::clear);
        self.reload.update(|value| *value = value.wrapping_add(1));
    }

    fn dispatch(&self, leave: LeaveRequest, status: LeaveStatus, comments: Option<String>) {
        if self.decide_action.pending().get_untracked() {
            return;
        }
        self.audit.with_value(|audit| {
            audit.user_action(
                "Leave Decision",
                "AdminDashboard",
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

pub fn use_admin_view_model() -> AdminViewModel {
    let api = use_api_client();
    let audit = api.audit().clone();
    let repository = AdminRepository::new_with_client(Rc::new(api));
    let reload = create_rw_signal(0u32);

    let repo = repository.clone();
    let stats_resource = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo.clone();
            async move { repo.fetch_stats().await }
        },
    );
    let repo = repository.clone();
    let pending_resource = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo.clone();
            async move { repo.fetch_pending().await }
        },
    );
    let repo = repository.clone();
    let all_resource = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo.clone();
            async move { repo.fetch_all().await }
        },
    );

    let stats = create_memo(move |_| {
        stats_resource
            .get()
            .and_then(Result::ok)
            .map(|stats| system_stats(&stats, today()))
            .unwrap_or_default()
    });
    let activity = create_memo(move |_| {
        all_resource
            .get()
            .and_then(Result::ok)
            .map(|leaves| recent_activity(&leaves, ACTIVITY_LIMIT))
            .unwrap_or_default()
    });

    let repo = repository;
    let decide_action = create_action(move |(leave, decision): &DecisionInput| {
        let repo = repo.clone();
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

    AdminViewModel {
        reload,
        stats_resource,
        pending_resource,
        stats,
        activity,
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
    use crate::test_support::helpers::leave_json;
    use crate::test_support::ssr::with_suppressed_resources;

    #[test]
    fn reject_dialog_collects_comment() {
        with_suppressed_resources(|| {
            let vm = use_admin_view_model();
            let leave: LeaveRequest =
                serde_json::from_value(leave_json(5, "CASUAL", "PENDING")).unwrap();

            vm.open_reject(leave);
            assert_eq!(vm.rejecting.get_untracked().map(|l| l.id), Some(5));
            vm.reject_comment.set("Team is short-staffed".into());
            vm.cancel_reject();
            assert!(vm.rejecting.get_untracked().is_none());
            assert!(vm.processing.get_untracked().is_none());
        });
    }

    #[test]
    fn refresh_clears_messages() {
        with_suppressed_resources(|| {
            let vm = use_admin_view_model();
            vm.messages.update(|state| state.set_error("boom"));
            vm.refresh();
            assert_eq!(vm.messages.get_untracked(), MessageState::default());
            assert_eq!(vm.reload.get_untracked(), 1);
            assert_eq!(vm.stats.get_untracked(), SystemStats::default());
        });
    }
}
