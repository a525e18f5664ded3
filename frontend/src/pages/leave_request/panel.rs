use crate::{
    api::LeaveType,
    components::{
        error::InlineErrorMessage,
        layout::{Layout, SuccessMessage, ValidationList},
    },
    pages::leave_request::{utils::reason_counter, view_model::use_leave_request_view_model},
    utils::time::{input_value, tomorrow},
    validation::MAX_REASON_LEN,
};
use leptos::{ev::SubmitEvent, *};

const FIELD: &str = "mt-1 block w-full rounded-md border border-border px-3 py-2 text-sm text-fg focus:outline-none focus:ring-action-primary-bg focus:border-action-primary-bg";

#[component]
pub fn LeaveRequestPage() -> impl IntoView {
    let vm = use_leave_request_view_model();
    let form = vm.form;
    let pending = vm.submit_action.pending();
    let min_date = input_value(Some(tomorrow()));

    let messages = Signal::derive(move || vm.messages());
    let remaining = move || {
        let leave_type = LeaveType::parse(&form.leave_type.get())?;
        if !leave_type.is_balance_capped() {
            return Some("No balance limit applies to emergency leave".to_string());
        }
        let balance = vm.balance()?;
        balance
            .remaining_for(leave_type)
            .map(|days| format!("Available: {} day(s)", days))
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <Layout>
            <div class="max-w-2xl mx-auto px-4 space-y-6">
                <div class="flex items-center justify-between">
                    <h1 class="text-2xl font-bold text-fg">"Request Leave"</h1>
                    <a href="/dashboard" class="text-sm text-fg-muted hover:text-fg">"Back to dashboard"</a>
                </div>

                {move || vm.success.get().map(|message| view! { <SuccessMessage message=message /> })}
                <InlineErrorMessage error=vm.submit_error />
                <ValidationList messages=messages />

                <form class="bg-surface-elevated shadow rounded-lg p-6 space-y-4" on:submit=on_submit>
                    <div>
                        <label for="leaveType" class="block text-sm font-medium text-fg">"Leave type"</label>
                        <select
                            id="leaveType"
                            class=FIELD
                            prop:value=move || form.leave_type.get()
                            on:change=move |ev| {
                                form.leave_type.set(event_target_value(&ev));
                                vm.touch();
                            }
                        >
                            <option value="">"Select leave type"</option>
                            {LeaveType::ALL
                                .iter()
                                .map(|kind| view! { <option value=kind.as_str()>{kind.label()}</option> })
                                .collect_view()}
                        </select>
                        <p class="mt-1 text-xs text-fg-muted">{remaining}</p>
                    </div>

                    <div class="grid grid-cols-1 gap-4 sm:grid-cols-2">
                        <div>
                            <label for="startDate" class="block text-sm font-medium text-fg">"Start date"</label>
                            <input
                                id="startDate"
                                type="date"
                                class=FIELD
                                min=min_date.clone()
                                prop:value=move || form.start_date.get()
                                on:input=move |ev| {
                                    form.start_date.set(event_target_value(&ev));
                                    vm.touch();
                                }
                            />
                        </div>
                        <div>
                            <label for="endDate" class="block text-sm font-medium text-fg">"End date"</label>
                            <input
                                id="endDate"
                                type="date"
                                class=FIELD
                                min=move || {
                                    let start = form.start_date.get();
                                    if start.is_empty() { min_date.clone() } else { start }
                                }
                                prop:value=move || form.end_date.get()
                                on:input=move |ev| {
                                    form.end_date.set(event_target_value(&ev));
                                    vm.touch();
                                }
                            />
                        </div>
                    </div>

                    <div class="rounded-md bg-surface-muted px-4 py-3 text-sm text-fg">
                        "Duration: "
                        <span class="font-semibold">{move || format!("{} business day(s)", vm.check.get().duration)}</span>
                    </div>

                    <div>
                        <label for="reason" class="block text-sm font-medium text-fg">"Reason (optional)"</label>
                        <textarea
                            id="reason"
                            rows="4"
                            class=FIELD
                            maxlength=MAX_REASON_LEN.to_string()
                            placeholder="Briefly describe the reason for your leave"
                            prop:value=move || form.reason.get()
                            on:input=move |ev| {
                                form.reason.set(event_target_value(&ev));
                                vm.touch();
                            }
                        ></textarea>
                        <p class="mt-1 text-right text-xs text-fg-muted">{move || reason_counter(&form.reason.get())}</p>
                    </div>

                    <div class="flex justify-end gap-2">
                        <button
                            type="button"
                            class="px-4 py-2 text-sm rounded-md border border-border text-fg hover:bg-surface-muted"
                            on:click=move |_| vm.reset()
                        >
                            "Reset"
                        </button>
                        <button
                            type="submit"
                            disabled=move || vm.submit_disabled()
                            class="px-4 py-2 text-sm font-semibold rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg-hover disabled:opacity-50"
                        >
                            {move || if pending.get() { "Submitting..." } else { "Submit Request" }}
                        </button>
                    </div>
                </form>
            </div>
        </Layout>
    }
}
