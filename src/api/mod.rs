//! REST Gateways
//!
//! One thin wrapper per backend resource. Every call returns the decoded body
//! or an [`ApiError`]; nothing is cached or retried.

mod auth;
mod error;
mod projects;
mod stories;
mod tasks;
mod users;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use error::{ApiError, ApiResult};
pub use projects::ProjectFilter;

/// Backend client for one request scope: base URL plus optional bearer token
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.endpoint(path);
        log::debug!("GET {}", url);
        let response = self
            .authorize(Request::get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let url = self.endpoint(path);
        log::debug!("POST {}", url);
        let request = self
            .authorize(Request::post(&url))
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        send(request).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let url = self.endpoint(path);
        log::debug!("PUT {}", url);
        let request = self
            .authorize(Request::put(&url))
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        send(request).await
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        let url = self.endpoint(path);
        log::debug!("DELETE {}", url);
        let response = self
            .authorize(Request::delete(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(&response).await
    }
}

async fn send<T: DeserializeOwned>(request: Request) -> ApiResult<T> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(response).await
}

async fn check_status(response: &Response) -> ApiResult<()> {
    if response.ok() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    match ApiError::from_status(response.status(), &body) {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    check_status(&response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
