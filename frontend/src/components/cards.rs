use leptos::*;

use crate::api::{LeaveBalance, LeaveType};

/// One row of the balance overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceLine {
    pub leave_type: LeaveType,
    pub remaining: i32,
    pub used: i32,
    pub allotment: i32,
}

impl BalanceLine {
    /// Share of the allotment already used, clamped to 0..=100.
    pub fn used_percent(&self) -> u8 {
        if self.allotment <= 0 {
            return 0;
        }
        (self.used.max(0) as i64 * 100 / self.allotment as i64).clamp(0, 100) as u8
    }
}

pub fn balance_lines(balance: &LeaveBalance) -> Vec<BalanceLine> {
    LeaveType::ALL
        .iter()
        .filter_map(|leave_type| {
            Some(BalanceLine {
                leave_type: *leave_type,
                remaining: balance.remaining_for(*leave_type)?,
                used: balance.used_for(*leave_type)?,
                allotment: balance.allotment_for(*leave_type)?,
            })
        })
        .collect()
}

#[component]
pub fn BalanceCards(#[prop(into)] balance: Signal<Option<LeaveBalance>>) -> impl IntoView {
    let lines = move || balance.get().map(|b| balance_lines(&b)).unwrap_or_default();

    view! {
        <div class="grid grid-cols-1 gap-4 sm:grid-cols-3">
            {move || {
                lines()
                    .into_iter()
                    .map(|line| {
                        let width = format!("width: {}%", line.used_percent());
                        view! {
                            <div class="bg-surface-elevated overflow-hidden shadow rounded-lg">
                                <div class="px-4 py-5 sm:p-6">
                                    <dt class="text-sm font-medium text-fg-muted">{line.leave_type.label()}</dt>
                                    <dd class="mt-1 text-3xl font-semibold text-fg">
                                        {line.remaining}
                                        <span class="text-sm font-normal text-fg-muted">{" days left"}</span>
                                    </dd>
                                    <div class="mt-3 h-2 rounded bg-surface-muted">
                                        <div class="h-2 rounded bg-action-primary-bg" style=width></div>
                                    </div>
                                    <p class="mt-2 text-xs text-fg-muted">
                                        {format!("{} of {} used", line.used, line.allotment)}
                                    </p>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] hint: Option<String>,
) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated overflow-hidden shadow rounded-lg">
            <div class="px-4 py-5 sm:p-6">
                <dt class="text-sm font-medium text-fg-muted truncate">{label}</dt>
                <dd class="mt-1 text-3xl font-semibold text-fg">{move || value.get()}</dd>
                {hint.map(|hint| view! { <p class="mt-1 text-xs text-fg-muted">{hint}</p> })}
            </div>
        </div>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::balance;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn balance_cards_render_each_capped_type() {
        let html = render_to_string(move || {
            let value = Signal::derive(|| Some(balance(20, 8, 5)));
            view! { <BalanceCards balance=value /> }
        });
        assert!(html.contains("Annual Leave"));
        assert!(html.contains("Sick Leave"));
        assert!(html.contains("Casual Leave"));
        assert!(!html.contains("Emergency"));
        assert!(html.contains("5 of 25 used"));
    }

    #[test]
    fn stat_card_renders_value_and_hint() {
        let html = render_to_string(move || {
            view! { <StatCard label="Pending Requests" value=Signal::derive(|| "3".to_string()) hint="awaiting review" /> }
        });
        assert!(html.contains("Pending Requests"));
        assert!(html.contains("awaiting review"));
    }
}
