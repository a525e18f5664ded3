use super::{
    repository::LeaveHistoryRepository,
    utils::{available_years, filter_and_sort, summarize, HistoryFilter, HistorySummary, SortField},
};
use crate::{
    api::{ApiError, LeaveRequest},
    state::auth::use_api_client,
    telemetry::AuditLogger,
    utils::sort::SortDirection,
};
use leptos::*;
use serde_json::json;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct LeaveHistoryViewModel {
    pub reload: RwSignal<u32>,
    pub leaves_resource: Resource<u32, Result<Vec<LeaveRequest>, ApiError>>,
    pub filter: RwSignal<HistoryFilter>,
    pub sort_field: RwSignal<SortField>,
    pub sort_direction: RwSignal<SortDirection>,
    pub visible: Memo<Vec<LeaveRequest>>,
    pub years: Memo<Vec<i32>>,
    pub summary: Memo<HistorySummary>,
    pub selected: RwSignal<Option<LeaveRequest>>,
    pub pending_delete: RwSignal<Option<LeaveRequest>>,
    pub delete_action: Action<i64, Result<(), ApiError>>,
    pub error: RwSignal<Option<ApiError>>,
    audit: StoredValue<AuditLogger>,
}

impl LeaveHistoryViewModel {
    pub fn refresh(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }

    pub fn clear_filters(&self) {
        self.filter.set(HistoryFilter::default());
    }

    pub fn toggle_direction(&self) {
        self.sort_direction.update(|dir| *dir = dir.toggled());
    }

    /// Opens the confirmation; only pending requests can be deleted.
    pub fn request_delete(&self, leave: LeaveRequest) {
        if !leave.can_delete() {
            self.error.set(Some(ApiError::validation(
                "Only pending requests can be deleted",
            )));
            return;
        }
        self.pending_delete.set(Some(leave));
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.set(None);
    }

    pub fn confirm_delete(&self) {
        let Some(leave) = self.pending_delete.get_untracked() else {
            return;
        };
        if self.delete_action.pending().get_untracked() {
            return;
        }
        self.audit.with_value(|audit| {
            audit.user_action(
                "Delete Leave Request",
                "LeaveHistoryPage",
                json!({ "leaveId": leave.id }),
            )
        });
        self.delete_action.dispatch(leave.id);
    }
}

pub fn use_leave_history_view_model() -> LeaveHistoryViewModel {
    let api = use_api_client();
    let audit = api.audit().clone();
    let repository = LeaveHistoryRepository::new_with_client(Rc::new(api));
    let reload = create_rw_signal(0u32);

    let repo = repository.clone();
    let leaves_resource = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo.clone();
            async move { repo.fetch_my_leaves().await }
        },
    );

    let filter = create_rw_signal(HistoryFilter::default());
    let sort_field = create_rw_signal(SortField::default());
    let sort_direction = create_rw_signal(SortDirection::default());

    let all = move || {
        leaves_resource
            .get()
            .and_then(Result::ok)
            .unwrap_or_default()
    };
    let visible = create_memo(move |_| {
        filter_and_sort(&all(), &filter.get(), sort_field.get(), sort_direction.get())
    });
    let years = create_memo(move |_| available_years(&all()));
    let summary = create_memo(move |_| summarize(&all()));

    let repo = repository;
    let delete_action = create_action(move |id: &i64| {
        let repo = repo.clone();
        let id = *id;
        async move { repo.delete(id).await }
    });

    let pending_delete = create_rw_signal(None::<LeaveRequest>);
    let error = create_rw_signal(None::<ApiError>);

    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            pending_delete.set(None);
            match result {
                Ok(()) => {
                    error.set(None);
                    reload.update(|value| *value = value.wrapping_add(1));
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    LeaveHistoryViewModel {
        reload,
        leaves_resource,
        filter,
        sort_field,
        sort_direction,
        visible,
        years,
        summary,
        selected: create_rw_signal(None),
        pending_delete,
        delete_action,
        error,
        audit: store_value(audit),
    }
}
