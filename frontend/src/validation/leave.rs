use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

use crate::api::{CreateLeaveRequest, LeaveBalance, LeaveType};

pub const MAX_REASON_LEN: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    DateRange,
    InsufficientBalance,
    MissingField,
}

/// Soft validation failures. They accumulate and are shown as a list; the
/// `Display` text is what the user reads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveValidationError {
    #[error("End date must be after start date")]
    DateRange,
    #[error("Insufficient leave balance for the requested duration")]
    InsufficientBalance { requested: i32, remaining: i32 },
    #[error("Please select a leave type")]
    MissingLeaveType,
    #[error("Please select a start date")]
    MissingStartDate,
    #[error("Please select an end date")]
    MissingEndDate,
    #[error("Duration must be at least 1 day")]
    ZeroDuration,
    #[error("Reason must be {} characters or fewer", MAX_REASON_LEN)]
    ReasonTooLong,
}

impl LeaveValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            LeaveValidationError::DateRange => ValidationErrorKind::DateRange,
            LeaveValidationError::InsufficientBalance { .. } => {
                ValidationErrorKind::InsufficientBalance
            }
            _ => ValidationErrorKind::MissingField,
        }
    }
}

/// Raw form input. Every field may still be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveDraft {
    pub leave_type: Option<LeaveType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DurationCheck {
    pub duration: i32,
    pub errors: Vec<LeaveValidationError>,
}

impl DurationCheck {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Counts Monday through Friday in `start..=end`. Holidays are not
/// considered. An inverted range counts as zero.
pub fn business_days(start: NaiveDate, end: NaiveDate) -> i32 {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .count() as i32
}

/// `Some(error)` when `duration` exceeds the remaining allotment. Emergency
/// leave and an unloaded balance are never checked.
pub fn check_balance(
    leave_type: LeaveType,
    duration: i32,
    balance: Option<&LeaveBalance>,
) -> Option<LeaveValidationError> {
    let remaining = balance?.remaining_for(leave_type)?;
    (duration > remaining).then_some(LeaveValidationError::InsufficientBalance {
        requested: duration,
        remaining,
    })
}

/// Live evaluation, re-run on every field change. Duration is settled before
/// the balance check so the check always sees the current range.
pub fn evaluate(draft: &LeaveDraft, balance: Option<&LeaveBalance>) -> DurationCheck {
    let mut check = DurationCheck::default();

    if let (Some(start), Some(end)) = (draft.start_date, draft.end_date) {
        if end < start {
            check.errors.push(LeaveValidationError::DateRange);
        } else {
            check.duration = business_days(start, end);
        }
    }

    if let Some(leave_type) = draft.leave_type {
        if let Some(err) = check_balance(leave_type, check.duration, balance) {
            check.errors.push(err);
        }
    }

    if draft.reason.chars().count() > MAX_REASON_LEN {
        check.errors.push(LeaveValidationError::ReasonTooLong);
    }

    check
}

/// Submit-time aggregate. Returns the payload only when every rule holds.
pub fn validate_for_submit(
    draft: &LeaveDraft,
    balance: Option<&LeaveBalance>,
) -> Result<CreateLeaveRequest, Vec<LeaveValidationError>> {
    let mut errors = Vec::new();
    if draft.leave_type.is_none() {
        errors.push(LeaveValidationError::MissingLeaveType);
    }
    if draft.start_date.is_none() {
        errors.push(LeaveValidationError::MissingStartDate);
    }
    if draft.end_date.is_none() {
        errors.push(LeaveValidationError::MissingEndDate);
    }

    let check = evaluate(draft, balance);
    let range_is_valid = !check.errors.contains(&LeaveValidationError::DateRange);
    if draft.start_date.is_some() && draft.end_date.is_some() && range_is_valid && check.duration < 1
    {
        errors.push(LeaveValidationError::ZeroDuration);
    }
    errors.extend(check.errors);

    match (draft.leave_type, draft.start_date, draft.end_date) {
        (Some(leave_type), Some(start_date), Some(end_date)) if errors.is_empty() => {
            let reason = draft.reason.trim();
            Ok(CreateLeaveRequest {
                leave_type,
                start_date,
                end_date,
                duration: check.duration,
                reason: (!reason.is_empty()).then(|| reason.to_string()),
            })
        }
        _ => Err(errors),
    }
}
