use crate::{
    api::{LeaveRequest, LeaveStatus, LeaveType},
    components::{
        badges::{LeaveTypeBadge, StatusBadge},
        cards::StatCard,
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::{Layout, LoadingSpinner},
    },
    pages::leave_history::{
        utils::{delete_prompt, SortField},
        view_model::{use_leave_history_view_model, LeaveHistoryViewModel},
    },
    utils::time::{format_date, format_optional_datetime},
};
use leptos::*;

const SELECT: &str = "rounded-md border border-border px-3 py-2 text-sm text-fg bg-surface-elevated";

#[component]
fn HistoryFilters(vm: LeaveHistoryViewModel) -> impl IntoView {
    let filter = vm.filter;

    view! {
        <div class="flex flex-wrap items-end gap-3">
            <select
                class=SELECT
                aria-label="Status"
                prop:value=move || filter.get().status.map(|s| s.as_str()).unwrap_or_default()
                on:change=move |ev| {
                    let status = LeaveStatus::parse(&event_target_value(&ev));
                    filter.update(|f| f.status = status);
                }
            >
                <option value="">"All statuses"</option>
                {LeaveStatus::ALL
                    .iter()
                    .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                    .collect_view()}
            </select>
            <select
                class=SELECT
                aria-label="Leave type"
                prop:value=move || filter.get().leave_type.map(|t| t.as_str()).unwrap_or_default()
                on:change=move |ev| {
                    let kind = LeaveType::parse(&event_target_value(&ev));
                    filter.update(|f| f.leave_type = kind);
                }
            >
                <option value="">"All types"</option>
                {LeaveType::ALL
                    .iter()
                    .map(|t| view! { <option value=t.as_str()>{t.short_label()}</option> })
                    .collect_view()}
            </select>
            <select
                class=SELECT
                aria-label="Year"
                prop:value=move || filter.get().year.map(|y| y.to_string()).unwrap_or_default()
                on:change=move |ev| {
                    let year = event_target_value(&ev).parse::<i32>().ok();
                    filter.update(|f| f.year = year);
                }
            >
                <option value="">"All years"</option>
                {move || {
                    vm.years
                        .get()
                        .into_iter()
                        .map(|y| view! { <option value=y.to_string()>{y}</option> })
                        .collect_view()
                }}
            </select>
            <select
                class=SELECT
                aria-label="Sort by"
                prop:value=move || vm.sort_field.get().as_str()
                on:change=move |ev| {
                    if let Some(field) = SortField::parse(&event_target_value(&ev)) {
                        vm.sort_field.set(field);
                    }
                }
            >
                {SortField::ALL
                    .iter()
                    .map(|f| view! { <option value=f.as_str()>{f.label()}</option> })
                    .collect_view()}
            </select>
            <button class=SELECT on:click=move |_| vm.toggle_direction() title="Toggle sort direction">
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
fn HistoryRow(leave: LeaveRequest, vm: LeaveHistoryViewModel) -> impl IntoView {
    let can_delete = leave.can_delete();
    let for_view = leave.clone();
    let for_delete = leave.clone();

    view! {
        <tr class="border-t border-border">
            <td class="px-4 py-3"><LeaveTypeBadge leave_type=leave.leave_type /></td>
            <td class="px-4 py-3 text-sm text-fg">{format_date(leave.start_date)}</td>
            <td class="px-4 py-3 text-sm text-fg">{format_date(leave.end_date)}</td>
            <td class="px-4 py-3 text-sm text-fg">{leave.duration}</td>
            <td class="px-4 py-3"><StatusBadge status=leave.status /></td>
            <td class="px-4 py-3 text-sm text-fg-muted">{format_optional_datetime(leave.created_at)}</td>
            <td class="px-4 py-3 text-right space-x-2">
                <button class="text-sm text-action-primary-bg" on:click=move |_| vm.selected.set(Some(for_view.clone()))>
                    "View"
                </button>
                {can_delete.then(|| view! {
                    <button class="text-sm text-status-error-text" on:click=move |_| vm.request_delete(for_delete.clone())>
                        "Delete"
                    </button>
                })}
            </td>
        </tr>
    }
}

#[component]
fn LeaveDetails(vm: LeaveHistoryViewModel) -> impl IntoView {
    move || {
        vm.selected.get().map(|leave| {
            view! {
                <div class="fixed inset-0 z-[60] flex items-center justify-center p-4">
                    <button
                        type="button"
                        aria-label="Close"
                        class="absolute inset-0 bg-overlay-backdrop"
                        on:click=move |_| vm.selected.set(None)
                    ></button>
                    <div class="relative w-full max-w-lg rounded-lg bg-surface-elevated shadow-xl p-6 space-y-3" role="dialog">
                        <h2 class="text-lg font-semibold text-fg">{leave.leave_type.label()}</h2>
                        <dl class="grid grid-cols-2 gap-2 text-sm">
                            <dt class="text-fg-muted">"Dates"</dt>
                            <dd class="text-fg">{format!("{} - {}", format_date(leave.start_date), format_date(leave.end_date))}</dd>
                            <dt class="text-fg-muted">"Duration"</dt>
                            <dd class="text-fg">{format!("{} day(s)", leave.duration)}</dd>
                            <dt class="text-fg-muted">"Status"</dt>
                            <dd><StatusBadge status=leave.status /></dd>
                            <dt class="text-fg-muted">"Reason"</dt>
                            <dd class="text-fg">{leave.reason.clone().unwrap_or_else(|| "-".into())}</dd>
                            <dt class="text-fg-muted">"Reviewed by"</dt>
                            <dd class="text-fg">{leave.approved_by_name.clone().unwrap_or_else(|| "-".into())}</dd>
                            <dt class="text-fg-muted">"Reviewed at"</dt>
                            <dd class="text-fg">{format_optional_datetime(leave.approved_at)}</dd>
                            <dt class="text-fg-muted">"Comments"</dt>
                            <dd class="text-fg">{leave.comments.clone().unwrap_or_else(|| "-".into())}</dd>
                        </dl>
                        <div class="flex justify-end">
                            <button class="px-4 py-2 text-sm rounded-md border border-border" on:click=move |_| vm.selected.set(None)>
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
pub fn LeaveHistoryPage() -> impl IntoView {
    let vm = use_leave_history_view_model();
    let summary = vm.summary;
    let load_error = Signal::derive(move || vm.leaves_resource.get().and_then(Result::err));
    let delete_message = Signal::derive(move || {
        vm.pending_delete
            .get()
            .map(|leave| delete_prompt(&leave))
            .unwrap_or_default()
    });

    view! {
        <Layout>
            <div class="px-4 space-y-6">
                <div class="flex items-center justify-between">
                    <h1 class="text-2xl font-bold text-fg">"My Leave History"</h1>
                    <div class="flex gap-2">
                        <button class="px-3 py-2 text-sm rounded-md border border-border text-fg" on:click=move |_| vm.refresh()>
                            "Refresh"
                        </button>
                        <a href="/leave-request" class="px-3 py-2 text-sm rounded-md text-action-primary-text bg-action-primary-bg">
                            "New Request"
                        </a>
                    </div>
                </div>

                <div class="grid grid-cols-2 gap-4 sm:grid-cols-4">
                    <StatCard label="Total" value=Signal::derive(move || summary.get().total.to_string()) />
                    <StatCard label="Pending" value=Signal::derive(move || summary.get().counts.pending.to_string()) />
                    <StatCard label="Approved" value=Signal::derive(move || summary.get().counts.approved.to_string()) />
                    <StatCard label="Rejected" value=Signal::derive(move || summary.get().counts.rejected.to_string()) />
                </div>

                <HistoryFilters vm=vm />
                <InlineErrorMessage error=load_error />
                <InlineErrorMessage error=vm.error />

                <Suspense fallback=move || view! { <LoadingSpinner /> }>
                    <Show
                        when=move || !vm.visible.get().is_empty()
                        fallback=|| view! {
                            <EmptyState
                                title="No leave requests found"
                                description="Try adjusting the filters or submit a new request."
                                action=("/leave-request", "Request Leave")
                            />
                        }
                    >
                        <div class="overflow-x-auto bg-surface-elevated shadow rounded-lg">
                            <table class="min-w-full">
                                <thead>
                                    <tr class="text-left text-xs uppercase text-fg-muted">
                                        <th class="px-4 py-2">"Type"</th>
                                        <th class="px-4 py-2">"Start"</th>
                                        <th class="px-4 py-2">"End"</th>
                                        <th class="px-4 py-2">"Days"</th>
                                        <th class="px-4 py-2">"Status"</th>
                                        <th class="px-4 py-2">"Requested"</th>
                                        <th class="px-4 py-2"></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || vm.visible.get()
                                        key=|leave| (leave.id, leave.status)
                                        children=move |leave| view! { <HistoryRow leave=leave vm=vm /> }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </Show>
                </Suspense>

                <LeaveDetails vm=vm />
                <ConfirmDialog
                    is_open=Signal::derive(move || vm.pending_delete.get().is_some())
                    title="Delete leave request"
                    message=delete_message
                    confirm_label="Delete"
                    confirm_disabled=Signal::derive(move || vm.delete_action.pending().get())
                    destructive=true
                    on_confirm=Callback::new(move |_| vm.confirm_delete())
                    on_cancel=Callback::new(move |_| vm.cancel_delete())
                />
            </div>
        </Layout>
    }
}
