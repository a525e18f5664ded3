use crate::api::{ApiClient, ApiError, LeaveBalance, LeaveRequest};
use std::rc::Rc;

#[derive(Clone)]
pub struct DashboardRepository {
    client: Rc<ApiClient>,
}

impl DashboardRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_balance(&self) -> Result<LeaveBalance, ApiError> {
        self.client.get_leave_balance().await
    }

    pub async fn fetch_my_leaves(&self) -> Result<Vec<LeaveRequest>, ApiError> {
        self.client.list_my_leave_requests().await
    }
}
