use chrono::{Datelike, NaiveDate};

use crate::api::{AdminStats, LeaveRequest, LeaveStatus};

pub const ACTIVITY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemStats {
    pub total_users: i64,
    pub total_leaves: i64,
    pub pending: usize,
    pub approved_this_month: usize,
    pub rejected: usize,
    pub active_employees: usize,
}

/// Approvals count toward the month the request was created in.
pub fn system_stats(stats: &AdminStats, today: NaiveDate) -> SystemStats {
    let in_current_month = |leave: &LeaveRequest| {
        leave
            .created_at
            .is_some_and(|at| at.year() == today.year() && at.month() == today.month())
    };
    SystemStats {
        total_users: stats.user_count,
        total_leaves: stats.leave_count,
        pending: stats
            .leaves
            .iter()
            .filter(|leave| leave.status == LeaveStatus::Pending)
            .count(),
        approved_this_month: stats
            .leaves
            .iter()
            .filter(|leave| leave.status == LeaveStatus::Approved && in_current_month(leave))
            .count(),
        rejected: stats
            .leaves
            .iter()
            .filter(|leave| leave.status == LeaveStatus::Rejected)
            .count(),
        active_employees: stats.users.iter().filter(|user| user.active).count(),
    }
}

/// Most recently updated decided requests.
pub fn recent_activity(leaves: &[LeaveRequest], limit: usize) -> Vec<LeaveRequest> {
    let mut decided: Vec<LeaveRequest> = leaves
        .iter()
        .filter(|leave| leave.status.is_terminal())
        .cloned()
        .collect();
    decided.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    decided.truncate(limit);
    decided
}

pub fn activity_phrase(status: LeaveStatus) -> &'static str {
    match status {
        LeaveStatus::Approved => "was approved for",
        LeaveStatus::Rejected => "was rejected for",
        LeaveStatus::Pending => "requested",
    }
}

pub fn decision_message(status: LeaveStatus, leave: &LeaveRequest) -> String {
    let verb = match status {
        LeaveStatus::Approved => "approved",
        LeaveStatus::Rejected => "rejected",
        LeaveStatus::Pending => "updated",
    };
    format!("Leave request for {} {}.", leave.display_name(), verb)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageState {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl MessageState {
    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
        self.error = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.success = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{leave_json, user_json};
    use serde_json::json;

    fn leave(id: i64, status: &str, created: &str, updated: &str) -> serde_json::Value {
        let mut value = leave_json(id, "ANNUAL", status);
        value["createdAt"] = json!(created);
        value["updatedAt"] = json!(updated);
        value
    }

    #[test]
    fn stats_are_derived_from_db_status() {
        let mut inactive = user_json(3, "EMPLOYEE");
        inactive["active"] = json!(false);
        let stats: AdminStats = serde_json::from_value(json!({
            "userCount": 3,
            "leaveCount": 4,
            "users": [user_json(1, "ADMIN"), user_json(2, "EMPLOYEE"), inactive],
            "leaves": [
                leave(1, "PENDING", "2024-03-01T09:00:00", "2024-03-01T09:00:00"),
                leave(2, "APPROVED", "2024-03-02T09:00:00", "2024-03-03T09:00:00"),
                leave(3, "APPROVED", "2024-02-02T09:00:00", "2024-02-03T09:00:00"),
                leave(4, "REJECTED", "2024-01-02T09:00:00", "2024-01-03T09:00:00"),
            ]
        }))
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        assert_eq!(
            system_stats(&stats, today),
            SystemStats {
                total_users: 3,
                total_leaves: 4,
                pending: 1,
                approved_this_month: 1,
                rejected: 1,
                active_employees: 2,
            }
        );
    }

    #[test]
    fn activity_skips_pending_and_orders_by_update() {
        let leaves: Vec<LeaveRequest> = vec![
            leave(1, "PENDING", "2024-03-01T09:00:00", "2024-03-09T09:00:00"),
            leave(2, "APPROVED", "2024-03-01T09:00:00", "2024-03-02T09:00:00"),
            leave(3, "REJECTED", "2024-03-01T09:00:00", "2024-03-05T09:00:00"),
        ]
        .into_iter()
        .map(|value| serde_json::from_value(value).unwrap())
        .collect();
        let ids: Vec<_> = recent_activity(&leaves, ACTIVITY_LIMIT)
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(recent_activity(&leaves, 1).len(), 1);
    }

    #[test]
    fn decision_message_names_requester() {
        let leave: LeaveRequest = serde_json::from_value(leave_json(4, "SICK", "PENDING")).unwrap();
        assert_eq!(
            decision_message(LeaveStatus::Rejected, &leave),
            "Leave request for Emil Employee rejected."
        );
        assert_eq!(activity_phrase(LeaveStatus::Approved), "was approved for");
    }

    #[test]
    fn message_state_resets_flags() {
        let mut state = MessageState::default();
        state.set_error("failed");
        assert!(state.error.is_some());
        assert!(state.success.is_none());

        state.set_success("ok");
        assert!(state.success.is_some());
        assert!(state.error.is_none());

        state.clear();
        assert_eq!(state, MessageState::default());
    }
}
