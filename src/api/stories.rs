//! Story Gateway

use super::{ApiClient, ApiResult};
use crate::models::{Story, StoryDraft};

impl ApiClient {
    pub async fn list_stories(&self) -> ApiResult<Vec<Story>> {
        self.get_json("stories").await
    }

    pub async fn create_story(&self, draft: &StoryDraft) -> ApiResult<Story> {
        self.post_json("stories", draft).await
    }

    pub async fn update_story(&self, id: &str, draft: &StoryDraft) -> ApiResult<Story> {
        self.put_json(&format!("stories/{}", id), draft).await
    }

    pub async fn delete_story(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("stories/{}", id)).await
    }
}
