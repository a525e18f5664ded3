use leptos::*;

use crate::api::{LeaveStatus, LeaveType, Role};

pub fn status_class(status: LeaveStatus) -> &'static str {
    match status {
        LeaveStatus::Pending => "bg-status-warning-bg text-status-warning-text",
        LeaveStatus::Approved => "bg-status-success-bg text-status-success-text",
        LeaveStatus::Rejected => "bg-status-error-bg text-status-error-text",
    }
}

#[component]
pub fn StatusBadge(status: LeaveStatus) -> impl IntoView {
    let class = format!(
        "inline-flex px-2 py-0.5 rounded-full text-xs font-semibold {}",
        status_class(status)
    );
    view! { <span class=class>{status.label()}</span> }
}

#[component]
pub fn LeaveTypeBadge(leave_type: LeaveType) -> impl IntoView {
    view! {
        <span class="inline-flex px-2 py-0.5 rounded text-xs font-medium bg-surface-muted text-fg">
            {leave_type.short_label()}
        </span>
    }
}

#[component]
pub fn RoleBadge(role: Role) -> impl IntoView {
    let class = match role {
        Role::Admin => "inline-flex px-2 py-0.5 rounded-full text-xs font-semibold bg-status-info-bg text-status-info-text",
        Role::Employee => "inline-flex px-2 py-0.5 rounded-full text-xs font-semibold bg-surface-muted text-fg",
    };
    view! { <span class=class>{role.label()}</span> }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn badges_render_labels() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <StatusBadge status=LeaveStatus::Approved />
                    <LeaveTypeBadge leave_type=LeaveType::Sick />
                    <RoleBadge role=Role::Admin />
                </div>
            }
        });
        assert!(html.contains("Approved"));
        assert!(html.contains("status-success"));
        assert!(html.contains("Sick"));
        assert!(html.contains("Administrator"));
    }
}
