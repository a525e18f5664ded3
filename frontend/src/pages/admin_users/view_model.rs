use super::{
    repository::AdminUsersRepository,
    utils::{filter_and_sort, summarize, UserFilter, UserSortField, UserSummary},
};
use crate::{
    api::{ApiError, User},
    state::auth::use_api_client,
    utils::sort::SortDirection,
};
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct AdminUsersViewModel {
    pub reload: RwSignal<u32>,
    pub users_resource: Resource<u32, Result<Vec<User>, ApiError>>,
    pub filter: RwSignal<UserFilter>,
    pub sort_field: RwSignal<UserSortField>,
    pub sort_direction: RwSignal<SortDirection>,
    pub visible: Memo<Vec<User>>,
    pub summary: Memo<UserSummary>,
    pub selected: RwSignal<Option<User>>,
}

impl AdminUsersViewModel {
    pub fn refresh(&self) {
        self.reload.update(|value| *value = value.wrapping_add(1));
    }

    pub fn clear_filters(&self) {
        self.filter.set(UserFilter::default());
    }

    pub fn toggle_direction(&self) {
        self.sort_direction.update(|dir| *dir = dir.toggled());
    }

    pub fn select(&self, user: User) {
        self.selected.set(Some(user));
    }

    pub fn close_details(&self) {
        self.selected.set(None);
    }
}

pub fn use_admin_users_view_model() -> AdminUsersViewModel {
    let api = use_api_client();
    let repository = AdminUsersRepository::new_with_client(Rc::new(api));
    let reload = create_rw_signal(0u32);

    let users_resource = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repository.clone();
            async move { repo.fetch_users().await }
        },
    );

    let filter = create_rw_signal(UserFilter::default());
    let sort_field = create_rw_signal(UserSortField::default());
    let sort_direction = create_rw_signal(SortDirection::Asc);

    let loaded = move || {
        users_resource
            .get()
            .and_then(Result::ok)
            .unwrap_or_default()
    };
    let visible = create_memo(move |_| {
        filter.with(|filter| {
            filter_and_sort(&loaded(), filter, sort_field.get(), sort_direction.get())
        })
    });
    let summary = create_memo(move |_| summarize(&loaded()));

    AdminUsersViewModel {
        reload,
        users_resource,
        filter,
        sort_field,
        sort_direction,
        visible,
        summary,
        selected: create_rw_signal(None),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::Role;
    use crate::test_support::helpers::regular_user;
    use crate::test_support::ssr::with_suppressed_resources;

    #[test]
    fn starts_ascending_by_first_name() {
        with_suppressed_resources(|| {
            let vm = use_admin_users_view_model();
            assert_eq!(vm.sort_field.get_untracked(), UserSortField::FirstName);
            assert_eq!(vm.sort_direction.get_untracked(), SortDirection::Asc);
            assert!(vm.visible.get_untracked().is_empty());

            vm.toggle_direction();
            assert_eq!(vm.sort_direction.get_untracked(), SortDirection::Desc);
        });
    }

    #[test]
    fn filters_and_details_reset() {
        with_suppressed_resources(|| {
            let vm = use_admin_users_view_model();
            vm.filter.update(|filter| filter.role = Some(Role::Admin));
            assert!(vm.filter.get_untracked().is_active());
            vm.clear_filters();
            assert!(!vm.filter.get_untracked().is_active());

            vm.select(regular_user());
            assert_eq!(vm.selected.get_untracked().map(|u| u.id), Some(2));
            vm.close_details();
            assert!(vm.selected.get_untracked().is_none());
        });
    }
}
