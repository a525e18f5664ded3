use reqwest::Method;
use serde_json::json;

use super::{
    client::ApiClient,
    types::{
        ApiError, CreateLeaveRequest, DecideLeaveRequest, LeaveBalance, LeaveRequest, LeaveStatus,
    },
};
use crate::telemetry::AuditCategory;

impl ApiClient {
    pub async fn get_leave_balance(&self) -> Result<LeaveBalance, ApiError> {
        self.get_json("/leaves/balance").await
    }

    pub async fn create_leave_request(
        &self,
        request: CreateLeaveRequest,
    ) -> Result<LeaveRequest, ApiError> {
        self.audit().info(
            AuditCategory::Api,
            "Creating Leave Request",
            json!({
                "leaveType": request.leave_type.as_str(),
                "startDate": request.start_date,
                "endDate": request.end_date,
                "duration": request.duration,
            }),
        );
        self.send_json(Method::POST, "/leaves", &request).await
    }

    pub async fn list_my_leave_requests(&self) -> Result<Vec<LeaveRequest>, ApiError> {
        self.get_json("/leaves/my").await
    }

    pub async fn list_pending_leave_requests(&self) -> Result<Vec<LeaveRequest>, ApiError> {
        self.get_json("/leaves/pending").await
    }

    pub async fn list_all_leave_requests(&self) -> Result<Vec<LeaveRequest>, ApiError> {
        self.get_json("/leaves").await
    }

    pub async fn list_leave_requests_by_status(
        &self,
        status: LeaveStatus,
    ) -> Result<Vec<LeaveRequest>, ApiError> {
        self.get_json(&format!("/leaves/status/{}", status.as_str()))
            .await
    }

    pub async fn get_leave_request(&self, id: i64) -> Result<LeaveRequest, ApiError> {
        self.get_json(&format!("/leaves/{}", id)).await
    }

    /// Only `APPROVED` and `REJECTED` are valid decisions.
    pub async fn decide_leave_request(
        &self,
        id: i64,
        request: DecideLeaveRequest,
    ) -> Result<LeaveRequest, ApiError> {
        if !LeaveStatus::Pending.can_transition_to(request.status) {
            return Err(ApiError::validation(
                "A decision must either approve or reject the request",
            ));
        }
        self.audit().info(
            AuditCategory::Api,
            "Deciding Leave Request",
            json!({
                "leaveId": id,
                "status": request.status.as_str(),
                "comments": request.comments,
            }),
        );
        self.send_json(Method::PUT, &format!("/leaves/{}/approve", id), &request)
            .await
    }

    pub async fn delete_leave_request(&self, id: i64) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/leaves/{}", id))
            .await
    }
}
