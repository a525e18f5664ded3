use crate::{
    api::LeaveRequest,
    components::{
        badges::{LeaveTypeBadge, StatusBadge},
        cards::{BalanceCards, StatCard},
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::{Layout, LoadingSpinner},
    },
    pages::dashboard::view_model::use_dashboard_view_model,
    state::auth::use_auth,
    utils::time::format_date,
};
use leptos::*;

#[component]
fn RecentLeaveRow(leave: LeaveRequest) -> impl IntoView {
    view! {
        <li class="py-3 flex items-center justify-between">
            <div class="flex items-center gap-3">
                <LeaveTypeBadge leave_type=leave.leave_type />
                <span class="text-sm text-fg">
                    {format!("{} - {}", format_date(leave.start_date), format_date(leave.end_date))}
                </span>
                <span class="text-xs text-fg-muted">{format!("{} day(s)", leave.duration)}</span>
            </div>
            <StatusBadge status=leave.status />
        </li>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let vm = use_dashboard_view_model();
    let (auth, _) = use_auth();
    let first_name = move || {
        auth.get()
            .user
            .map(|user| user.first_name)
            .unwrap_or_default()
    };

    let balance = Signal::derive(move || vm.balance_resource.get().and_then(Result::ok));
    let balance_error = Signal::derive(move || vm.balance_resource.get().and_then(Result::err));
    let leaves_error = Signal::derive(move || vm.leaves_resource.get().and_then(Result::err));
    let counts = vm.counts;

    view! {
        <Layout>
            <div class="space-y-6 px-4">
                <div class="flex items-center justify-between">
                    <div>
                        <h1 class="text-2xl font-bold text-fg">{move || format!("Welcome back, {}", first_name())}</h1>
                        <p class="text-sm text-fg-muted">"Here's an overview of your leave."</p>
                    </div>
                    <div class="flex gap-2">
                        <button
                            class="px-3 py-2 text-sm rounded-md border border-border text-fg hover:bg-surface-muted"
                            on:click=move |_| vm.refresh()
                        >
                            "Refresh"
                        </button>
                        <a href="/leave-request" class="px-3 py-2 text-sm rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg-hover">
                            "Request Leave"
                        </a>
                    </div>
                </div>

                <section>
                    <h2 class="text-lg font-semibold text-fg mb-3">"Leave Balance"</h2>
                    <InlineErrorMessage error=balance_error />
                    <Suspense fallback=move || view! { <LoadingSpinner /> }>
                        {move || vm.balance_resource.get().map(|_| view! { <BalanceCards balance=balance /> })}
                    </Suspense>
                </section>

                <div class="grid grid-cols-1 gap-4 sm:grid-cols-3">
                    <StatCard label="Pending" value=Signal::derive(move || counts.get().pending.to_string()) />
                    <StatCard label="Approved" value=Signal::derive(move || counts.get().approved.to_string()) />
                    <StatCard label="Rejected" value=Signal::derive(move || counts.get().rejected.to_string()) />
                </div>

                <section class="bg-surface-elevated shadow rounded-lg p-6">
                    <div class="flex items-center justify-between mb-2">
                        <h2 class="text-lg font-semibold text-fg">"Recent Requests"</h2>
                        <a href="/leave-history" class="text-sm text-action-primary-bg">"View all"</a>
                    </div>
                    <InlineErrorMessage error=leaves_error />
                    <Suspense fallback=move || view! { <LoadingSpinner /> }>
                        <Show
                            when=move || !vm.recent_leaves.get().is_empty()
                            fallback=|| view! {
                                <EmptyState
                                    title="No leave requests yet"
                                    description="Your submitted requests will appear here."
                                    action=("/leave-request", "Request Leave")
                                />
                            }
                        >
                            <ul class="divide-y divide-border">
                                <For
                                    each=move || vm.recent_leaves.get()
                                    key=|leave| leave.id
                                    children=|leave| view! { <RecentLeaveRow leave=leave /> }
                                />
                            </ul>
                        </Show>
                    </Suspense>
                </section>
            </div>
        </Layout>
    }
}
