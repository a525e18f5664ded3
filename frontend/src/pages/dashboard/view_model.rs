use super::{
    repository::DashboardRepository,
    utils::{count_by_status, most_recent, LeaveCounts, RECENT_LIMIT},
};
use crate::{
    api::{ApiError, LeaveBalance, LeaveRequest},
    state::auth::use_api_client,
};
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct DashboardViewModel {
    pub reload: RwSignal<u32>,
    pub balance_resource: Resource<u32, Result<LeaveBalance, ApiError>>,
    pub leaves_resource: Resource<u32, Result<Vec<LeaveRequest>, ApiError>>,
    pub recent_leaves: Memo<Vec<LeaveRequest>>,
    pub counts: Memo<LeaveCounts>,
}

impl DashboardViewModel {
    pub fn refresh(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }
}

pub fn use_dashboard_view_model() -> DashboardViewModel {
    let repository = DashboardRepository::new_with_client(Rc::new(use_api_client()));
    let reload = create_rw_signal(0u32);

    let repo = repository.clone();
    let balance_resource = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo.clone();
            async move { repo.fetch_balance().await }
        },
    );

    let repo = repository;
    let leaves_resource = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo.clone();
            async move { repo.fetch_my_leaves().await }
        },
    );

    let all_leaves = move || {
        leaves_resource
            .get()
            .and_then(Result::ok)
            .unwrap_or_default()
    };
    let recent_leaves = create_memo(move |_| most_recent(all_leaves(), RECENT_LIMIT));
    let counts = create_memo(move |_| count_by_status(&all_leaves()));

    DashboardViewModel {
        reload,
        balance_resource,
        leaves_resource,
        recent_leaves,
        counts,
    }
}
