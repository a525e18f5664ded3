use crate::{
    api::LeaveRequest,
    components::{
        badges::{LeaveTypeBadge, StatusBadge},
        cards::StatCard,
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::{ErrorMessage, Layout, LoadingSpinner, SuccessMessage},
    },
    pages::admin::{
        utils::activity_phrase,
        view_model::{use_admin_view_model, AdminViewModel},
    },
    utils::time::{format_date, now_local, relative_time},
};
use leptos::*;

#[component]
fn PendingRow(leave: LeaveRequest, vm: AdminViewModel) -> impl IntoView {
    let id = leave.id;
    let busy = move || vm.processing.get() == Some(id) || vm.decide_action.pending().get();
    let for_approve = leave.clone();
    let for_reject = leave.clone();

    view! {
        <li class="py-4 flex flex-col gap-2 sm:flex-row sm:items-center sm:justify-between">
            <div>
                <p class="text-sm font-semibold text-fg">{leave.display_name()}</p>
                <p class="text-xs text-fg-muted">{leave.user_email.clone().unwrap_or_default()}</p>
                <div class="mt-1 flex items-center gap-2 text-sm text-fg">
                    <LeaveTypeBadge leave_type=leave.leave_type />
                    {format!(
                        "{} - {} ({} day(s))",
                        format_date(leave.start_date),
                        format_date(leave.end_date),
                        leave.duration
                    )}
                </div>
                {leave.reason.clone().map(|reason| view! { <p class="mt-1 text-xs text-fg-muted">{reason}</p> })}
            </div>
            <div class="flex gap-2">
                <button
                    class="px-3 py-1.5 text-sm rounded-md text-action-primary-text bg-action-primary-bg disabled:opacity-50"
                    disabled=busy
                    on:click=move |_| vm.approve(for_approve.clone())
                >
                    "Approve"
                </button>
                <button
                    class="px-3 py-1.5 text-sm rounded-md text-action-danger-text bg-action-danger-bg disabled:opacity-50"
                    disabled=busy
                    on:click=move |_| vm.open_reject(for_reject.clone())
                >
                    "Reject"
                </button>
            </div>
        </li>
    }
}

#[component]
fn ActivityRow(leave: LeaveRequest) -> impl IntoView {
    let when = leave
        .updated_at
        .map(|at| relative_time(at, now_local()))
        .unwrap_or_default();
    view! {
        <li class="py-3 flex items-center justify-between text-sm">
            <span class="text-fg">
                <span class="font-semibold">{leave.display_name()}</span>
                {format!(" {} {} leave", activity_phrase(leave.status), leave.leave_type.short_label().to_lowercase())}
            </span>
            <span class="flex items-center gap-2">
                <StatusBadge status=leave.status />
                <span class="text-xs text-fg-muted">{when}</span>
            </span>
        </li>
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let vm = use_admin_view_model();
    let stats = vm.stats;
    let pending = move || {
        vm.pending_resource
            .get()
            .and_then(Result::ok)
            .unwrap_or_default()
    };
    let stats_error = Signal::derive(move || vm.stats_resource.get().and_then(Result::err));
    let pending_error = Signal::derive(move || vm.pending_resource.get().and_then(Result::err));
    let reject_message = Signal::derive(move || {
        vm.rejecting
            .get()
            .map(|leave| {
                format!(
                    "Reject the {} leave request from {}? You may add a comment.",
                    leave.leave_type.short_label().to_lowercase(),
                    leave.display_name()
                )
            })
            .unwrap_or_default()
    });

    view! {
        <Layout>
            <div class="px-4 space-y-6">
                <div class="flex items-center justify-between">
                    <h1 class="text-2xl font-bold text-fg">"Admin Dashboard"</h1>
                    <div class="flex gap-2">
                        <a href="/admin/leaves" class="px-3 py-2 text-sm rounded-md border border-border text-fg">"All Leaves"</a>
                        <a href="/admin/users" class="px-3 py-2 text-sm rounded-md border border-border text-fg">"Users"</a>
                        <button class="px-3 py-2 text-sm rounded-md border border-border text-fg" on:click=move |_| vm.refresh()>
                            "Refresh"
                        </button>
                    </div>
                </div>

                {move || vm.messages.get().success.map(|msg| view! { <SuccessMessage message=msg /> })}
                {move || vm.messages.get().error.map(|msg| view! { <ErrorMessage message=msg /> })}
                <InlineErrorMessage error=stats_error />

                <div class="grid grid-cols-2 gap-4 lg:grid-cols-3">
                    <StatCard label="Total Users" value=Signal::derive(move || stats.get().total_users.to_string()) />
                    <StatCard label="Active Employees" value=Signal::derive(move || stats.get().active_employees.to_string()) />
                    <StatCard label="Total Requests" value=Signal::derive(move || stats.get().total_leaves.to_string()) />
                    <StatCard label="Pending" value=Signal::derive(move || stats.get().pending.to_string()) />
                    <StatCard label="Approved This Month" value=Signal::derive(move || stats.get().approved_this_month.to_string()) />
                    <StatCard label="Rejected" value=Signal::derive(move || stats.get().rejected.to_string()) />
                </div>

                <section class="bg-surface-elevated shadow rounded-lg p-6">
                    <h2 class="text-lg font-semibold text-fg">"Pending Requests"</h2>
                    <InlineErrorMessage error=pending_error />
                    <Suspense fallback=move || view! { <LoadingSpinner /> }>
                        <Show
                            when=move || !pending().is_empty()
                            fallback=|| view! { <EmptyState title="All caught up" description="There are no pending leave requests." /> }
                        >
                            <ul class="divide-y divide-border">
                                <For
                                    each=pending
                                    key=|leave| leave.id
                                    children=move |leave| view! { <PendingRow leave=leave vm=vm /> }
                                />
                            </ul>
                        </Show>
                    </Suspense>
                </section>

                <section class="bg-surface-elevated shadow rounded-lg p-6">
                    <h2 class="text-lg font-semibold text-fg">"Recent Activity"</h2>
                    <Suspense fallback=move || view! { <LoadingSpinner /> }>
                        <Show
                            when=move || !vm.activity.get().is_empty()
                            fallback=|| view! { <p class="text-sm text-fg-muted py-3">"No recent decisions."</p> }
                        >
                            <ul class="divide-y divide-border">
                                <For
                                    each=move || vm.activity.get()
                                    key=|leave| (leave.id, leave.status)
                                    children=|leave| view! { <ActivityRow leave=leave /> }
                                />
                            </ul>
                        </Show>
                    </Suspense>
                </section>

                <ConfirmDialog
                    is_open=Signal::derive(move || vm.rejecting.get().is_some())
                    title="Reject leave request"
                    message=reject_message
                    confirm_label="Reject"
                    destructive=true
                    comment=vm.reject_comment
                    on_confirm=Callback::new(move |_| vm.confirm_reject())
                    on_cancel=Callback::new(move |_| vm.cancel_reject())
                />
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
    fn admin_page_renders_sections() {
        let html = render_signed_in(Some(admin_user()), move || {
            provide_auth(Some(admin_user()));
            view! { <AdminPage /> }
        });
        assert!(html.contains("Admin Dashboard"));
        assert!(html.contains("Approved This Month"));
        assert!(html.contains("Pending Requests"));
        assert!(html.contains("Recent Activity"));
    }
}
