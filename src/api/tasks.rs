//! Task Gateway
//!
//! Updates are partial: only the fields present in a [`TaskPatch`] are sent.

use super::{ApiClient, ApiResult};
use crate::models::{Task, TaskDraft, TaskPatch};

impl ApiClient {
    pub async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        self.get_json("tasks").await
    }

    pub async fn create_task(&self, draft: &TaskDraft) -> ApiResult<Task> {
        self.post_json("tasks", draft).await
    }

    pub async fn update_task(&self, id: &str, patch: &TaskPatch) -> ApiResult<Task> {
        self.put_json(&format!("tasks/{}", id), patch).await
    }

    pub async fn delete_task(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("tasks/{}", id)).await
    }
}
