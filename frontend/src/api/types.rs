use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Employee,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "EMPLOYEE",
            Role::Admin => "ADMIN",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Employee => "Employee",
            Role::Admin => "Administrator",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "EMPLOYEE" => Some(Role::Employee),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    Annual,
    Sick,
    Casual,
    Emergency,
}

impl LeaveType {
    pub const ALL: [LeaveType; 4] = [
        LeaveType::Annual,
        LeaveType::Sick,
        LeaveType::Casual,
        LeaveType::Emergency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Annual => "ANNUAL",
            LeaveType::Sick => "SICK",
            LeaveType::Casual => "CASUAL",
            LeaveType::Emergency => "EMERGENCY",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::Annual => "Annual Leave",
            LeaveType::Sick => "Sick Leave",
            LeaveType::Casual => "Casual Leave",
            LeaveType::Emergency => "Emergency Leave",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            LeaveType::Annual => "Annual",
            LeaveType::Sick => "Sick",
            LeaveType::Casual => "Casual",
            LeaveType::Emergency => "Emergency",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// Emergency leave is never drawn from a tracked allotment.
    pub fn is_balance_capped(&self) -> bool {
        !matches!(self, LeaveType::Emergency)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub const ALL: [LeaveStatus; 3] = [
        LeaveStatus::Pending,
        LeaveStatus::Approved,
        LeaveStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "PENDING",
            LeaveStatus::Approved => "APPROVED",
            LeaveStatus::Rejected => "REJECTED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "Pending",
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }

    pub fn can_transition_to(&self, next: LeaveStatus) -> bool {
        matches!(
            (self, next),
            (LeaveStatus::Pending, LeaveStatus::Approved)
                | (LeaveStatus::Pending, LeaveStatus::Rejected)
        )
    }
}

fn default_true() -> bool {
    true
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_leave_balance: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sick_leave_balance: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub casual_leave_balance: Option<i32>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: i32,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: LeaveStatus,
    #[serde(default)]
    pub approved_by: Option<i64>,
    #[serde(default)]
    pub approved_by_name: Option<String>,
    #[serde(default)]
    pub approved_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl LeaveRequest {
    /// Owners may withdraw a request only before an admin has decided it.
    pub fn can_delete(&self) -> bool {
        self.status == LeaveStatus::Pending
    }

    pub fn display_name(&self) -> String {
        self.user_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| format!("User #{}", self.user_id))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalance {
    #[serde(default)]
    pub annual_remaining: i32,
    #[serde(default)]
    pub sick_remaining: i32,
    #[serde(default)]
    pub casual_remaining: i32,
    #[serde(default)]
    pub annual_used: i32,
    #[serde(default)]
    pub sick_used: i32,
    #[serde(default)]
    pub casual_used: i32,
}

impl LeaveBalance {
    /// `None` for leave types without a tracked allotment.
    pub fn remaining_for(&self, leave_type: LeaveType) -> Option<i32> {
        match leave_type {
            LeaveType::Annual => Some(self.annual_remaining),
            LeaveType::Sick => Some(self.sick_remaining),
            LeaveType::Casual => Some(self.casual_remaining),
            LeaveType::Emergency => None,
        }
    }

    pub fn used_for(&self, leave_type: LeaveType) -> Option<i32> {
        match leave_type {
            LeaveType::Annual => Some(self.annual_used),
            LeaveType::Sick => Some(self.sick_used),
            LeaveType::Casual => Some(self.casual_used),
            LeaveType::Emergency => None,
        }
    }

    pub fn allotment_for(&self, leave_type: LeaveType) -> Option<i32> {
        self.remaining_for(leave_type)?
            .checked_add(self.used_for(leave_type)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequest {
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecideLeaveRequest {
    pub status: LeaveStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl RegisterRequest {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: password.into(),
            role: Role::Employee,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(default)]
    pub user_count: i64,
    #[serde(default)]
    pub leave_count: i64,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub leaves: Vec<LeaveRequest>,
}

use leptos::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "VALIDATION_ERROR")
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNKNOWN")
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "REQUEST_FAILED")
    }

    /// Maps a non-2xx status onto the error codes surfaced by the UI.
    pub fn from_status(status: u16, msg: impl Into<String>) -> Self {
        let code = match status {
            401 => "UNAUTHORIZED",
            403 => "FORBIDDEN",
            404 => "NOT_FOUND",
            _ => "SERVER_ERROR",
        };
        Self::with_code(msg, code).with_details(serde_json::json!({ "status": status }))
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == "UNAUTHORIZED"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn serialize_create_leave_request_camel_case_fields() {
        let req = CreateLeaveRequest {
            leave_type: LeaveType::Annual,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            duration: 5,
            reason: None,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["leaveType"], serde_json::json!("ANNUAL"));
        assert_eq!(v["startDate"], serde_json::json!("2024-03-04"));
        assert_eq!(v["endDate"], serde_json::json!("2024-03-08"));
        assert_eq!(v["duration"], serde_json::json!(5));
        assert!(v.get("reason").is_none());
    }

    #[wasm_bindgen_test]
    fn deserialize_auth_response_defaults_token_type() {
        let raw = serde_json::json!({
            "token": "abc",
            "user": {
                "id": 7,
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "role": "ADMIN"
            }
        });
        let response: AuthResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.user.role, Role::Admin);
        assert!(response.user.active);
    }
}
