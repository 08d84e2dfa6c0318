//! Application Context
//!
//! Session-lifetime services constructed once in `App` and provided via the
//! Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::notifications::NotificationHub;
use crate::session::SessionStore;
use crate::storage::KeyValueStore;
use crate::theme::ThemeStore;

/// App-wide services provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub session: SessionStore,
    pub theme: ThemeStore,
    notifications: StoredValue<NotificationHub>,
}

impl AppContext {
    pub fn new(config: &AppConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            session: SessionStore::new(config, Arc::clone(&storage)),
            theme: ThemeStore::new(storage),
            notifications: StoredValue::new(NotificationHub::new()),
        }
    }

    /// Gateway client for the current session
    pub fn api(&self) -> ApiClient {
        self.session.client()
    }

    pub fn notifications(&self) -> NotificationHub {
        self.notifications.get_value()
    }
}

/// Get the app context
pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}
