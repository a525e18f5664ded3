use crate::api::{ApiClient, ApiError, DecideLeaveRequest, LeaveRequest, LeaveStatus};
use std::rc::Rc;

#[derive(Clone)]
pub struct AdminLeavesRepository {
    client: Rc<ApiClient>,
}

impl AdminLeavesRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// Narrows on the server when a status is given.
    pub async fn fetch_leaves(
        &self,
        status: Option<LeaveStatus>,
    ) -> Result<Vec<LeaveRequest>, ApiError> {
        match status {
            Some(status) => self.client.list_leave_requests_by_status(status).await,
            None => self.client.list_all_leave_requests().await,
        }
    }

    pub async fn decide(
        &self,
        id: i64,
        decision: DecideLeaveRequest,
    ) -> Result<LeaveRequest, ApiError> {
        self.client.decide_leave_request(id, decision).await
    }
}
