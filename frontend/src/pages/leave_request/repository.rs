use crate::api::{ApiClient, ApiError, CreateLeaveRequest, LeaveBalance, LeaveRequest};
use std::rc::Rc;

#[derive(Clone)]
pub struct LeaveRequestRepository {
    client: Rc<ApiClient>,
}

impl LeaveRequestRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_balance(&self) -> Result<LeaveBalance, ApiError> {
        self.client.get_leave_balance().await
    }

    pub async fn submit(&self, payload: CreateLeaveRequest) -> Result<LeaveRequest, ApiError> {
        self.client.create_leave_request(payload).await
    }
}
