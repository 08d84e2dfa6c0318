//! Session Store
//!
//! Token and profile of the signed-in user. The token is persisted in browser
//! storage and restored at startup; the profile is looked up from it.

use std::sync::Arc;

use leptos::prelude::*;

use crate::api::{ApiClient, ApiError, ApiResult};
use crate::config::{AppConfig, TOKEN_KEY};
use crate::models::User;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    /// Session as persisted: token only, profile still to be looked up
    pub fn restore(storage: &dyn KeyValueStore) -> Self {
        let token = storage.get(TOKEN_KEY).filter(|token| !token.trim().is_empty());
        Self { token, user: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Signed-in session; the token is persisted
    pub fn signed_in(storage: &dyn KeyValueStore, token: String, user: Option<User>) -> Self {
        storage.set(TOKEN_KEY, &token);
        Self { token: Some(token), user }
    }

    /// Signed-out session; the persisted token is removed
    pub fn signed_out(storage: &dyn KeyValueStore) -> Self {
        storage.remove(TOKEN_KEY);
        Self::default()
    }
}

/// Reactive session handle shared through context
#[derive(Clone, Copy)]
pub struct SessionStore {
    state: RwSignal<Session>,
    storage: StoredValue<Arc<dyn KeyValueStore>>,
    api_url: StoredValue<String>,
}

impl SessionStore {
    pub fn new(config: &AppConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let session = Session::restore(storage.as_ref());
        Self {
            state: RwSignal::new(session),
            storage: StoredValue::new(storage),
            api_url: StoredValue::new(config.api_url.clone()),
        }
    }

    fn anonymous_client(&self) -> ApiClient {
        self.api_url.with_value(|url| ApiClient::new(url.as_str()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(Session::is_authenticated)
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|session| session.user.clone())
    }

    pub fn user_id(&self) -> Option<String> {
        self.state.with_untracked(|session| session.user.as_ref().map(|user| user.id.clone()))
    }

    /// Gateway client carrying the current token (read untracked)
    pub fn client(&self) -> ApiClient {
        let token = self.state.with_untracked(|session| session.token.clone());
        self.anonymous_client().with_token(token)
    }

    /// Look up the profile for a restored token.
    ///
    /// A rejected token is discarded; other failures keep it for the next try.
    pub async fn restore(&self) {
        if !self.state.with_untracked(Session::is_authenticated) {
            return;
        }
        match self.client().profile().await {
            Ok(user) => {
                log::info!("session restored for {}", user.first_name);
                self.state.update(|session| session.user = Some(user));
            }
            Err(ApiError::Unauthorized) => {
                log::warn!("stored session token rejected; signing out");
                self.logout();
            }
            Err(e) => log::error!("profile lookup failed: {}", e),
        }
    }

    pub async fn login(&self, login: &str, password: &str) -> ApiResult<()> {
        let anonymous = self.anonymous_client();
        let token = anonymous.login(login, password).await?;

        let user = match anonymous.with_token(Some(token.clone())).profile().await {
            Ok(user) => Some(user),
            Err(e) => {
                log::error!("profile lookup after login failed: {}", e);
                None
            }
        };
        log::info!("signed in as {}", login);
        let session = self.storage.with_value(|storage| Session::signed_in(storage.as_ref(), token, user));
        self.state.set(session);
        Ok(())
    }

    pub fn logout(&self) {
        log::info!("signed out");
        let session = self.storage.with_value(|storage| Session::signed_out(storage.as_ref()));
        self.state.set(session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_restore_without_token_is_signed_out() {
        let storage = MemoryStore::new();
        assert!(!Session::restore(&storage).is_authenticated());

        storage.set(TOKEN_KEY, "  ");
        assert!(!Session::restore(&storage).is_authenticated());
    }

    #[test]
    fn test_sign_in_persists_and_restores_token() {
        let storage = MemoryStore::new();
        let user = User { id: "u1".into(), first_name: "Ada".into() };
        let session = Session::signed_in(&storage, "tok".into(), Some(user.clone()));
        assert!(session.is_authenticated());
        assert_eq!(session.user, Some(user));

        let restored = Session::restore(&storage);
        assert_eq!(restored.token.as_deref(), Some("tok"));
        assert_eq!(restored.user, None);
    }

    #[test]
    fn test_sign_out_clears_storage() {
        let storage = MemoryStore::new();
        Session::signed_in(&storage, "tok".into(), None);
        let session = Session::signed_out(&storage);
        assert_eq!(session, Session::default());
        assert_eq!(storage.get(TOKEN_KEY), None);
    }
}
