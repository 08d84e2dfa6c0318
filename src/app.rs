//! ManageMe Frontend App
//!
//! Builds the session-lifetime services, provides them as context and
//! routes between the pages.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use reactive_stores::Store;

use crate::components::{
    ActiveProjectPage, LoginPage, Navbar, ProjectListPage, RequireAuth, StoryListPage, TaskBoardPage,
    TaskListPage,
};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::storage::BrowserStorage;
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    log::info!("using backend at {}", config.api_url);

    let ctx = AppContext::new(&config, Arc::new(BrowserStorage));
    provide_context(ctx);
    provide_context(Store::new(AppState::default()));

    // Look up the profile for a token left by a previous visit
    let session = ctx.session;
    spawn_local(async move { session.restore().await });

    view! {
        <Router>
            <Navbar />
            <main class="main-content">
                <Routes fallback=|| view! { <p class="empty-state">"Page not found"</p> }>
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/") view=|| view! { <RequireAuth><ProjectListPage /></RequireAuth> } />
                    <Route path=path!("/active") view=|| view! { <RequireAuth><ActiveProjectPage /></RequireAuth> } />
                    <Route path=path!("/stories") view=|| view! { <RequireAuth><StoryListPage /></RequireAuth> } />
                    <Route path=path!("/tasks") view=|| view! { <RequireAuth><TaskListPage /></RequireAuth> } />
                    <Route path=path!("/board") view=|| view! { <RequireAuth><TaskBoardPage /></RequireAuth> } />
                </Routes>
            </main>
        </Router>
    }
}
