use crate::api::{ApiClient, ApiError, LeaveRequest};
use std::rc::Rc;

#[derive(Clone)]
pub struct LeaveHistoryRepository {
    client: Rc<ApiClient>,
}

impl LeaveHistoryRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_my_leaves(&self) -> Result<Vec<LeaveRequest>, ApiError> {
        self.client.list_my_leave_requests().await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete_leave_request(id).await
    }
}
