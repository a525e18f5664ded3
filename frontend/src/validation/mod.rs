pub mod leave;

pub use leave::{
    business_days, evaluate, validate_for_submit, DurationCheck, LeaveDraft, LeaveValidationError,
    ValidationErrorKind, MAX_REASON_LEN,
};
