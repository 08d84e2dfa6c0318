//! Project Gateway
//!
//! CRUD on `/projects` plus the active-project pointer at `/projects/active`.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;

use super::{ApiClient, ApiError, ApiResult};
use crate::models::{Project, ProjectDraft, ProjectStatus};

/// Optional list filter, sent as query parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    pub tag: Option<String>,
    pub status: Option<ProjectStatus>,
}

impl ProjectFilter {
    /// `""` or `?tag=..&status=..` with percent-encoded values
    pub fn query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(tag) = self.tag.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            params.push(format!("tag={}", utf8_percent_encode(tag, NON_ALPHANUMERIC)));
        }
        if let Some(status) = self.status {
            params.push(format!("status={}", status.as_str()));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

#[derive(Serialize)]
struct ActiveProjectArgs<'a> {
    id: &'a str,
}

impl ApiClient {
    pub async fn list_projects(&self, filter: &ProjectFilter) -> ApiResult<Vec<Project>> {
        self.get_json(&format!("projects{}", filter.query_string())).await
    }

    pub async fn get_project(&self, id: &str) -> ApiResult<Project> {
        self.get_json(&format!("projects/{}", id)).await
    }

    pub async fn create_project(&self, draft: &ProjectDraft) -> ApiResult<Project> {
        self.post_json("projects", draft).await
    }

    pub async fn update_project(&self, id: &str, draft: &ProjectDraft) -> ApiResult<Project> {
        self.put_json(&format!("projects/{}", id), draft).await
    }

    pub async fn delete_project(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("projects/{}", id)).await
    }

    /// Active project, `None` when no project is marked active
    pub async fn active_project(&self) -> ApiResult<Option<Project>> {
        match self.get_json::<Option<Project>>("projects/active").await {
            Err(ApiError::NotFound) => Ok(None),
            other => other,
        }
    }

    pub async fn set_active_project(&self, id: &str) -> ApiResult<Project> {
        self.put_json("projects/active", &ActiveProjectArgs { id }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_query() {
        assert_eq!(ProjectFilter::default().query_string(), "");
        let blank = ProjectFilter { tag: Some("  ".into()), status: None };
        assert_eq!(blank.query_string(), "");
    }

    #[test]
    fn test_filter_encodes_values() {
        let filter = ProjectFilter {
            tag: Some("front end&ui".into()),
            status: Some(ProjectStatus::Archived),
        };
        assert_eq!(filter.query_string(), "?tag=front%20end%26ui&status=archived");
    }

    #[test]
    fn test_status_only_filter() {
        let filter = ProjectFilter { tag: None, status: Some(ProjectStatus::Active) };
        assert_eq!(filter.query_string(), "?status=active");
    }
}
