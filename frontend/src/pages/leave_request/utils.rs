use crate::{
    api::LeaveType,
    utils::time::parse_input_date,
    validation::{LeaveDraft, MAX_REASON_LEN},
};
use leptos::*;

pub const SUCCESS_MESSAGE: &str =
    "Leave request submitted successfully! Redirecting to dashboard...";
pub const REDIRECT_DELAY_MS: u32 = 2_000;

#[derive(Clone, Copy)]
pub struct LeaveFormState {
    pub leave_type: RwSignal<String>,
    pub start_date: RwSignal<String>,
    pub end_date: RwSignal<String>,
    pub reason: RwSignal<String>,
}

impl Default for LeaveFormState {
    fn default() -> Self {
        Self {
            leave_type: create_rw_signal(String::new()),
            start_date: create_rw_signal(String::new()),
            end_date: create_rw_signal(String::new()),
            reason: create_rw_signal(String::new()),
        }
    }
}

impl LeaveFormState {
    pub fn draft(&self) -> LeaveDraft {
        LeaveDraft {
            leave_type: LeaveType::parse(&self.leave_type.get()),
            start_date: parse_input_date(&self.start_date.get()),
            end_date: parse_input_date(&self.end_date.get()),
            reason: self.reason.get(),
        }
    }

    pub fn reset(&self) {
        self.leave_type.set(String::new());
        self.start_date.set(String::new());
        self.end_date.set(String::new());
        self.reason.set(String::new());
    }
}

pub fn reason_counter(reason: &str) -> String {
    format!("{}/{}", reason.chars().count(), MAX_REASON_LEN)
}
