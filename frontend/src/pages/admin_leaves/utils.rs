use crate::api::{LeaveRequest, LeaveStatus, LeaveType};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveFilter {
    pub leave_type: Option<LeaveType>,
    pub search: String,
}

impl LeaveFilter {
    pub fn is_active(&self) -> bool {
        self.leave_type.is_some() || !self.search.trim().is_empty()
    }

    pub fn matches(&self, leave: &LeaveRequest) -> bool {
        let type_ok = self.leave_type.map_or(true, |kind| leave.leave_type == kind);
        let term = self.search.trim().to_lowercase();
        let search_ok = term.is_empty()
            || leave.display_name().to_lowercase().contains(&term)
            || leave
                .user_email
                .as_deref()
                .is_some_and(|email| email.to_lowercase().contains(&term));
        type_ok && search_ok
    }
}

/// Pending requests first, then newest first.
pub fn review_order(leaves: &[LeaveRequest], filter: &LeaveFilter) -> Vec<LeaveRequest> {
    let mut visible: Vec<LeaveRequest> = leaves
        .iter()
        .filter(|leave| filter.matches(leave))
        .cloned()
        .collect();
    visible.sort_by(|a, b| {
        let a_pending = a.status == LeaveStatus::Pending;
        let b_pending = b.status == LeaveStatus::Pending;
        b_pending
            .cmp(&a_pending)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    visible
}

pub fn status_option(status: Option<LeaveStatus>) -> &'static str {
    status.map(|s| s.as_str()).unwrap_or_default()
}
