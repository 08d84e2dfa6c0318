//! User Gateway (read-only)

use super::{ApiClient, ApiResult};
use crate::models::User;

impl ApiClient {
    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.get_json("users").await
    }
}
