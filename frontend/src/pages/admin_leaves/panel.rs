use crate::{
    api::{LeaveRequest, LeaveStatus, LeaveType},
    components::{
        badges::{LeaveTypeBadge, StatusBadge},
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::{ErrorMessage, Layout, LoadingSpinner, SuccessMessage},
    },
    pages::admin_leaves::{
        utils::status_option,
        view_model::{use_admin_leaves_view_model, AdminLeavesViewModel},
    },
    utils::time::{format_date, format_optional_datetime},
};
use leptos::*;

const CONTROL: &str = "rounded-md border border-border px-3 py-2 text-sm text-fg bg-surface-elevated";

#[component]
fn LeaveFilters(vm: AdminLeavesViewModel) -> impl IntoView {
    let filter = vm.filter;

    view! {
        <div class="flex flex-wrap items-end gap-3">
            <select
                class=CONTROL
                aria-label="Status"
                prop:value=move || status_option(vm.status.get())
                on:change=move |ev| vm.status.set(LeaveStatus::parse(&event_target_value(&ev)))
            >
                <option value="">"All statuses"</option>
                {LeaveStatus::ALL
                    .iter()
                    .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                    .collect_view()}
            </select>
            <select
                class=CONTROL
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
            <input
                type="search"
                class=CONTROL
                placeholder="Search employee..."
                prop:value=move || filter.get().search
                on:input=move |ev| {
                    let term = event_target_value(&ev);
                    filter.update(|f| f.search = term);
                }
            />
            <Show when=move || vm.status.get().is_some() || filter.get().is_active()>
                <button class="text-sm text-action-primary-bg" on:click=move |_| vm.clear_filters()>
                    "Clear filters"
                </button>
            </Show>
        </div>
    }
}

#[component]
fn LeaveRow(leave: LeaveRequest, vm: AdminLeavesViewModel) -> impl IntoView {
    let id = leave.id;
    let pending = leave.status == LeaveStatus::Pending;
    let busy = move || vm.processing.get() == Some(id) || vm.decide_action.pending().get();
    let for_view = leave.clone();
    let for_approve = leave.clone();
    let for_reject = leave.clone();

    view! {
        <tr class="border-t border-border">
            <td class="px-4 py-3">
                <p class="text-sm font-medium text-fg">{leave.display_name()}</p>
                <p class="text-xs text-fg-muted">{leave.user_email.clone().unwrap_or_default()}</p>
            </td>
            <td class="px-4 py-3"><LeaveTypeBadge leave_type=leave.leave_type /></td>
            <td class="px-4 py-3 text-sm text-fg">
                {format!("{} - {}", format_date(leave.start_date), format_date(leave.end_date))}
            </td>
            <td class="px-4 py-3 text-sm text-fg">{leave.duration}</td>
            <td class="px-4 py-3"><StatusBadge status=leave.status /></td>
            <td class="px-4 py-3 text-right space-x-2">
                <button class="text-sm text-action-primary-bg" on:click=move |_| vm.selected.set(Some(for_view.clone()))>
                    "View"
                </button>
                {pending.then(|| view! {
                    <button
                        class="text-sm text-status-success-text disabled:opacity-50"
                        disabled=busy
                        on:click=move |_| vm.approve(for_approve.clone())
                    >
                        "Approve"
                    </button>
                    <button
                        class="text-sm text-status-error-text disabled:opacity-50"
                        disabled=busy
                        on:click=move |_| vm.open_reject(for_reject.clone())
                    >
                        "Reject"
                    </button>
                })}
            </td>
        </tr>
    }
}

#[component]
fn LeaveDetails(vm: AdminLeavesViewModel) -> impl IntoView {
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
                        <h2 class="text-lg font-semibold text-fg">
                            {format!("{} - {}", leave.display_name(), leave.leave_type.label())}
                        </h2>
                        <dl class="grid grid-cols-2 gap-2 text-sm">
                            <dt class="text-fg-muted">"Dates"</dt>
                            <dd class="text-fg">{format!("{} - {}", format_date(leave.start_date), format_date(leave.end_date))}</dd>
                            <dt class="text-fg-muted">"Duration"</dt>
                            <dd class="text-fg">{format!("{} day(s)", leave.duration)}</dd>
                            <dt class="text-fg-muted">"Status"</dt>
                            <dd><StatusBadge status=leave.status /></dd>
                            <dt class="text-fg-muted">"Reason"</dt>
                            <dd class="text-fg">{leave.reason.clone().unwrap_or_else(|| "-".into())}</dd>
                            <dt class="text-fg-muted">"Requested"</dt>
                            <dd class="text-fg">{format_optional_datetime(leave.created_at)}</dd>
                            <dt class="text-fg-muted">"Reviewed by"</dt>
                            <dd class="text-fg">{leave.approved_by_name.clone().unwrap_or_else(|| "-".into())}</dd>
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
pub fn AdminLeavesPage() -> impl IntoView {
    let vm = use_admin_leaves_view_model();
    let load_error = Signal::derive(move || vm.leaves_resource.get().and_then(Result::err));
    let reject_message = Signal::derive(move || {
        vm.rejecting
            .get()
            .map(|leave| format!("Reject the leave request from {}?", leave.display_name()))
            .unwrap_or_default()
    });

    view! {
        <Layout>
            <div class="px-4 space-y-6">
                <div class="flex items-center justify-between">
                    <div>
                        <a href="/admin" class="text-sm text-action-primary-bg">"Back to Admin"</a>
                        <h1 class="text-2xl font-bold text-fg">"All Leave Requests"</h1>
                    </div>
                    <button class="px-3 py-2 text-sm rounded-md border border-border text-fg" on:click=move |_| vm.refresh()>
                        "Refresh"
                    </button>
                </div>

                {move || vm.messages.get().success.map(|msg| view! { <SuccessMessage message=msg /> })}
                {move || vm.messages.get().error.map(|msg| view! { <ErrorMessage message=msg /> })}

                <LeaveFilters vm=vm />
                <InlineErrorMessage error=load_error />

                <Suspense fallback=move || view! { <LoadingSpinner /> }>
                    <Show
                        when=move || !vm.visible.get().is_empty()
                        fallback=|| view! { <EmptyState title="No leave requests found" description="Nothing matches the selected filters." /> }
                    >
                        <div class="overflow-x-auto bg-surface-elevated shadow rounded-lg">
                            <table class="min-w-full">
                                <thead>
                                    <tr class="text-left text-xs uppercase text-fg-muted">
                                        <th class="px-4 py-2">"Employee"</th>
                                        <th class="px-4 py-2">"Type"</th>
                                        <th class="px-4 py-2">"Dates"</th>
                                        <th class="px-4 py-2">"Days"</th>
                                        <th class="px-4 py-2">"Status"</th>
                                        <th class="px-4 py-2"></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || vm.visible.get()
                                        key=|leave| (leave.id, leave.status)
                                        children=move |leave| view! { <LeaveRow leave=leave vm=vm /> }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </Show>
                </Suspense>

                <LeaveDetails vm=vm />
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
