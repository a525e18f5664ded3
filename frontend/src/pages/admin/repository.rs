use crate::api::{ApiClient, ApiError, AdminStats, DecideLeaveRequest, LeaveRequest};
use std::rc::Rc;

#[derive(Clone)]
pub struct AdminRepository {
    client: Rc<ApiClient>,
}

impl AdminRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_stats(&self) -> Result<AdminStats, ApiError> {
        self.client.get_admin_stats().await
    }

    pub async fn fetch_pending(&self) -> Result<Vec<LeaveRequest>, ApiError> {
        self.client.list_pending_leave_requests().await
    }

    pub async fn fetch_all(&self) -> Result<Vec<LeaveRequest>, ApiError> {
        self.client.list_all_leave_requests().await
    }

    pub async fn decide(
        &self,
        id: i64,
        decision: DecideLeaveRequest,
    ) -> Result<LeaveRequest, ApiError> {
        self.client.decide_leave_request(id, decision).await
    }
}
