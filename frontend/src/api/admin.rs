use super::{
    client::ApiClient,
    types::{AdminStats, ApiError, User},
};

impl ApiClient {
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/admin/users").await
    }

    pub async fn get_admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.get_json("/admin/db-status").await
    }
}
