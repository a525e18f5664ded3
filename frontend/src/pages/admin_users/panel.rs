use crate::{
    api::{Role, User},
    components::{
        badges::RoleBadge,
        cards::StatCard,
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::{Layout, LoadingSpinner},
    },
    pages::admin_users::{
        utils::{balance_summary, status_label, StatusFilter, UserSortField},
        view_model::{use_admin_users_view_model, AdminUsersViewModel},
    },
    utils::time::format_optional_datetime,
};
use leptos::*;

const CONTROL: &str = "rounded-md border border-border px-3 py-2 text-sm text-fg bg-surface-elevated";

fn status_class(active: bool) -> &'static str {
    if active {
        "text-xs font-medium text-status-success-text"
    } else {
        "text-xs font-medium text-status-error-text"
    }
}

#[component]
fn UserFilters(vm: AdminUsersViewModel) -> impl IntoView {
    let filter = vm.filter;

    view! {
        <div class="flex flex-wrap items-end gap-3">
            <select
                class=CONTROL
                aria-label="Role"
                prop:value=move || filter.get().role.map(|r| r.as_str()).unwrap_or_default()
                on:change=move |ev| {
                    let role = Role::parse(&event_target_value(&ev));
                    filter.update(|f| f.role = role);
                }
            >
                <option value="">"All Roles"</option>
                <option value=Role::Employee.as_str()>{Role::Employee.label()}</option>
                <option value=Role::Admin.as_str()>{Role::Admin.label()}</option>
            </select>
            <select
                class=CONTROL
                aria-label="Status"
                prop:value=move || filter.get().status.map(|s| s.as_str()).unwrap_or_default()
                on:change=move |ev| {
                    let status = StatusFilter::parse(&event_target_value(&ev));
                    filter.update(|f| f.status = status);
                }
            >
                <option value="">"All Statuses"</option>
                <option value=StatusFilter::Active.as_str()>"Active"</option>
                <option value=StatusFilter::Inactive.as_str()>"Inactive"</option>
            </select>
            <input
                type="search"
                class=CONTROL
                placeholder="Search by name or email..."
                prop:value=move || filter.get().search
                on:input=move |ev| {
                    let term = event_target_value(&ev);
                    filter.update(|f| f.search = term);
                }
            />
            <select
                class=CONTROL
                aria-label="Sort by"
                prop:value=move || vm.sort_field.get().as_str()
                on:change=move |ev| {
                    if let Some(field) = UserSortField::parse(&event_target_value(&ev)) {
                        vm.sort_field.set(field);
                    }
                }
            >
                {UserSortField::ALL
                    .iter()
                    .map(|f| view! { <option value=f.as_str()>{f.label()}</option> })
                    .collect_view()}
            </select>
            <button class=CONTROL on:click=move |_| vm.toggle_direction() title="Toggle sort direction">
                {move || vm.sort_direction.get().arrow()}
            </button>
            <Show when=move || filter.get().is_active()>
                <button class="text-sm text-action-primary-bg" on:click=move |_| vm.clear_filters()>
                    "Clear filters"
                </button>
            </Show>
        </div>
    }
}

#[component]
fn UserRow(user: User, vm: AdminUsersViewModel) -> impl IntoView {
    let selected = user.clone();

    view! {
        <tr class="border-t border-border">
            <td class="px-4 py-3">
                <div class="flex items-center gap-3">
                    <span class="flex h-9 w-9 items-center justify-center rounded-full bg-surface-muted text-sm font-semibold text-fg">
                        {user.initials()}
                    </span>
                    <div>
                        <p class="text-sm font-medium text-fg">{user.full_name()}</p>
                        <p class="text-xs text-fg-muted">{user.email.clone()}</p>
                    </div>
                </div>
            </td>
            <td class="px-4 py-3"><RoleBadge role=user.role /></td>
            <td class="px-4 py-3"><span class=status_class(user.active)>{status_label(user.active)}</span></td>
            <td class="px-4 py-3 text-xs text-fg-muted">{balance_summary(&user).unwrap_or_else(|| "N/A".into())}</td>
            <td class="px-4 py-3 text-sm text-fg-muted">{format_optional_datetime(user.created_at)}</td>
            <td class="px-4 py-3 text-right">
                <button class="text-sm text-action-primary-bg" on:click=move |_| vm.select(selected.clone())>
                    "View"
                </button>
            </td>
        </tr>
    }
}

#[component]
fn UserDetails(vm: AdminUsersViewModel) -> impl IntoView {
    move || {
        vm.selected.get().map(|user| {
            view! {
                <div class="fixed inset-0 z-[60] flex items-center justify-center p-4">
                    <button
                        type="button"
                        aria-label="Close"
                        class="absolute inset-0 bg-overlay-backdrop"
                        on:click=move |_| vm.close_details()
                    ></button>
                    <div class="relative w-full max-w-lg rounded-lg bg-surface-elevated shadow-xl p-6 space-y-3" role="dialog">
                        <h2 class="text-lg font-semibold text-fg">{user.full_name()}</h2>
                        <dl class="grid grid-cols-2 gap-2 text-sm">
                            <dt class="text-fg-muted">"Email"</dt>
                            <dd class="text-fg">{user.email.clone()}</dd>
                            <dt class="text-fg-muted">"Role"</dt>
                            <dd><RoleBadge role=user.role /></dd>
                            <dt class="text-fg-muted">"Status"</dt>
                            <dd class=status_class(user.active)>{status_label(user.active)}</dd>
                            <dt class="text-fg-muted">"Leave balances"</dt>
                            <dd class="text-fg">{balance_summary(&user).unwrap_or_else(|| "N/A".into())}</dd>
                            <dt class="text-fg-muted">"Joined"</dt>
                            <dd class="text-fg">{format_optional_datetime(user.created_at)}</dd>
                            <dt class="text-fg-muted">"Last updated"</dt>
                            <dd class="text-fg">{format_optional_datetime(user.updated_at)}</dd>
                        </dl>
                        <div class="flex justify-end">
                            <button class="px-4 py-2 text-sm rounded-md border border-border" on:click=move |_| vm.close_details()>
                                "Close"
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let vm = use_admin_users_view_model();
    let summary = vm.summary;
    let load_error = Signal::derive(move || vm.users_resource.get().and_then(Result::err));

    view! {
        <Layout>
            <div class="px-4 space-y-6">
                <div class="flex items-center justify-between">
                    <div>
                        <a href="/admin" class="text-sm text-action-primary-bg">"Back to Admin"</a>
                        <h1 class="text-2xl font-bold text-fg">"User Management"</h1>
                    </div>
                    <button class="px-3 py-2 text-sm rounded-md border border-border text-fg" on:click=move |_| vm.refresh()>
                        "Refresh"
                    </button>
                </div>

                <div class="grid grid-cols-2 gap-4 sm:grid-cols-4">
                    <StatCard label="Total Users" value=Signal::derive(move || summary.get().total.to_string()) />
                    <StatCard label="Employees" value=Signal::derive(move || summary.get().employees.to_string()) />
                    <StatCard label="Admins" value=Signal::derive(move || summary.get().admins.to_string()) />
                    <StatCard label="Active" value=Signal::derive(move || summary.get().active.to_string()) />
                </div>

                <UserFilters vm=vm />
                <InlineErrorMessage error=load_error />

                <h2 class="text-lg font-semibold text-fg">
                    {move || format!("Users ({})", vm.visible.get().len())}
                </h2>
                <Suspense fallback=move || view! { <LoadingSpinner /> }>
                    <Show
                        when=move || !vm.visible.get().is_empty()
                        fallback=move || {
                            let description = if vm.filter.get().is_active() {
                                "No users match your current filters."
                            } else {
                                "No users have registered yet."
                            };
                            view! { <EmptyState title="No users found" description=description /> }
                        }
                    >
                        <div class="overflow-x-auto bg-surface-elevated shadow rounded-lg">
                            <table class="min-w-full">
                                <thead>
                                    <tr class="text-left text-xs uppercase text-fg-muted">
                                        <th class="px-4 py-2">"User"</th>
                                        <th class="px-4 py-2">"Role"</th>
                                        <th class="px-4 py-2">"Status"</th>
                                        <th class="px-4 py-2">"Leave Balances"</th>
                                        <th class="px-4 py-2">"Joined"</th>
                                        <th class="px-4 py-2"></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || vm.visible.get()
                                        key=|user| user.id
                                        children=move |user| view! { <UserRow user=user vm=vm /> }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </Show>
                </Suspense>

                <UserDetails vm=vm />
            </div>
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{admin_user, provide_auth};
    use crate::test_support::ssr::render_signed_in;

    #[test]
    fn users_page_renders_filters_and_stats() {
        let html = render_signed_in(Some(admin_user()), move || {
            provide_auth(Some(admin_user()));
            view! { <AdminUsersPage /> }
        });
        assert!(html.contains("User Management"));
        assert!(html.contains("All Roles"));
        assert!(html.contains("Date Created"));
        assert!(html.contains("Employees"));
    }
}
