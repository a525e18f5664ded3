use chrono::Datelike;
use std::collections::BTreeSet;

use crate::{
    api::{LeaveRequest, LeaveStatus, LeaveType},
    pages::dashboard::utils::{count_by_status, LeaveCounts},
    utils::sort::SortDirection,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub status: Option<LeaveStatus>,
    pub leave_type: Option<LeaveType>,
    pub year: Option<i32>,
}

impl HistoryFilter {
    pub fn is_active(&self) -> bool {
        self.status.is_some() || self.leave_type.is_some() || self.year.is_some()
    }

    pub fn matches(&self, leave: &LeaveRequest) -> bool {
        self.status.map_or(true, |status| leave.status == status)
            && self.leave_type.map_or(true, |kind| leave.leave_type == kind)
            && self
                .year
                .map_or(true, |year| created_year(leave) == Some(year))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    CreatedAt,
    StartDate,
    EndDate,
    Duration,
    Status,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::CreatedAt,
        SortField::StartDate,
        SortField::EndDate,
        SortField::Duration,
        SortField::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::StartDate => "startDate",
            SortField::EndDate => "endDate",
            SortField::Duration => "duration",
            SortField::Status => "status",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "Date Requested",
            SortField::StartDate => "Start Date",
            SortField::EndDate => "End Date",
            SortField::Duration => "Duration",
            SortField::Status => "Status",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == value)
    }
}

fn created_year(leave: &LeaveRequest) -> Option<i32> {
    leave.created_at.map(|at| at.year())
}

/// Distinct request years, newest first.
pub fn available_years(leaves: &[LeaveRequest]) -> Vec<i32> {
    let years: BTreeSet<i32> = leaves.iter().filter_map(created_year).collect();
    years.into_iter().rev().collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistorySummary {
    pub counts: LeaveCounts,
    pub total: usize,
}

pub fn summarize(leaves: &[LeaveRequest]) -> HistorySummary {
    HistorySummary {
        counts: count_by_status(leaves),
        total: leaves.len(),
    }
}

pub fn filter_and_sort(
    leaves: &[LeaveRequest],
    filter: &HistoryFilter,
    field: SortField,
    direction: SortDirection,
) -> Vec<LeaveRequest> {
    let mut visible: Vec<LeaveRequest> = leaves
        .iter()
        .filter(|leave| filter.matches(leave))
        .cloned()
        .collect();
    visible.sort_by(|a, b| {
        let ordering = match field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::StartDate => a.start_date.cmp(&b.start_date),
            SortField::EndDate => a.end_date.cmp(&b.end_date),
            SortField::Duration => a.duration.cmp(&b.duration),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        };
        direction.apply(ordering)
    });
    visible
}

pub fn delete_prompt(leave: &LeaveRequest) -> String {
    format!(
        "Are you sure you want to delete your {} leave request?",
        leave.leave_type.short_label().to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::leave_json;

    fn leave(id: i64, kind: &str, status: &str, created: &str, duration: i32) -> LeaveRequest {
        let mut value = leave_json(id, kind, status);
        value["createdAt"] = serde_json::json!(created);
        value["duration"] = serde_json::json!(duration);
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> Vec<LeaveRequest> {
        vec![
            leave(1, "ANNUAL", "APPROVED", "2023-11-02T09:00:00", 3),
            leave(2, "SICK", "PENDING", "2024-02-01T09:00:00", 1),
            leave(3, "ANNUAL", "REJECTED", "2024-03-15T09:00:00", 5),
            leave(4, "CASUAL", "PENDING", "2024-01-10T09:00:00", 2),
        ]
    }

    fn ids(leaves: &[LeaveRequest]) -> Vec<i64> {
        leaves.iter().map(|l| l.id).collect()
    }

    #[test]
    fn default_order_is_newest_request_first() {
        let visible = filter_and_sort(
            &sample(),
            &HistoryFilter::default(),
            SortField::default(),
            SortDirection::default(),
        );
        assert_eq!(ids(&visible), vec![3, 2, 4, 1]);
    }

    #[test]
    fn filters_combine() {
        let filter = HistoryFilter {
            status: Some(LeaveStatus::Pending),
            leave_type: None,
            year: Some(2024),
        };
        assert!(filter.is_active());
        let visible = filter_and_sort(&sample(), &filter, SortField::Duration, SortDirection::Asc);
        assert_eq!(ids(&visible), vec![2, 4]);

        let by_type = HistoryFilter {
            leave_type: Some(LeaveType::Annual),
            ..HistoryFilter::default()
        };
        let visible = filter_and_sort(&sample(), &by_type, SortField::Duration, SortDirection::Desc);
        assert_eq!(ids(&visible), vec![3, 1]);
    }

    #[test]
    fn years_and_summary() {
        let leaves = sample();
        assert_eq!(available_years(&leaves), vec![2024, 2023]);
        let summary = summarize(&leaves);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.counts.pending, 2);
        assert_eq!(summary.counts.approved, 1);
        assert_eq!(summary.counts.rejected, 1);
    }

    #[test]
    fn sort_field_round_trips_names() {
        for field in SortField::ALL {
            assert_eq!(SortField::parse(field.as_str()), Some(field));
        }
        assert_eq!(SortField::parse("bogus"), None);
    }

    #[test]
    fn delete_prompt_names_the_leave_type() {
        let leave = leave(1, "SICK", "PENDING", "2024-01-01T00:00:00", 1);
        assert_eq!(
            delete_prompt(&leave),
            "Are you sure you want to delete your sick leave request?"
        );
    }
}
