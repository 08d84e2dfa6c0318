//! Authentication Gateway

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiResult};
use crate::models::User;

#[derive(Serialize)]
struct LoginArgs<'a> {
    login: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

impl ApiClient {
    /// Exchange credentials for a session token
    pub async fn login(&self, login: &str, password: &str) -> ApiResult<String> {
        let response: LoginResponse = self.post_json("auth/login", &LoginArgs { login, password }).await?;
        Ok(response.token)
    }

    /// Profile of the user owning this client's token
    pub async fn profile(&self) -> ApiResult<User> {
        self.get_json("auth/profile").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_body_shape() {
        let body = serde_json::to_value(LoginArgs { login: "ada", password: "secret" }).unwrap();
        assert_eq!(body, serde_json::json!({ "login": "ada", "password": "secret" }));
    }

    #[test]
    fn test_login_response_ignores_extra_fields() {
        let response: LoginResponse = serde_json::from_str(r#"{"token":"t0k","expiresIn":3600}"#).unwrap();
        assert_eq!(response.token, "t0k");
    }
}
