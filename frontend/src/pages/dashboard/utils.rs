use crate::api::{LeaveRequest, LeaveStatus};

pub const RECENT_LIMIT: usize = 5;

/// Newest first by creation time; undated entries sort last.
pub fn most_recent(mut leaves: Vec<LeaveRequest>, limit: usize) -> Vec<LeaveRequest> {
    leaves.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    leaves.truncate(limit);
    leaves
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaveCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

pub fn count_by_status(leaves: &[LeaveRequest]) -> LeaveCounts {
    leaves
        .iter()
        .fold(LeaveCounts::default(), |mut counts, leave| {
            match leave.status {
                LeaveStatus::Pending => counts.pending += 1,
                LeaveStatus::Approved => counts.approved += 1,
                LeaveStatus::Rejected => counts.rejected += 1,
            }
            counts
        })
}
