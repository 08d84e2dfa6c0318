//! Background loads that refresh one store collection each.
//!
//! Results are dropped when the requesting view has been unmounted; failures
//! are logged and leave the store as it was.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiClient, ProjectFilter};
use crate::lifecycle::MountGuard;
use crate::store::{AppStateStoreFields, AppStore};

pub fn load_projects(api: ApiClient, store: AppStore, guard: MountGuard, filter: ProjectFilter) {
    spawn_local(async move {
        match api.list_projects(&filter).await {
            Ok(projects) => {
                if guard.still_mounted("project list") {
                    log::debug!("loaded {} projects", projects.len());
                    store.projects().set(projects);
                }
            }
            Err(e) => log::error!("failed to load projects: {}", e),
        }
    });
}

pub fn load_active_project(api: ApiClient, store: AppStore, guard: MountGuard) {
    spawn_local(async move {
        match api.active_project().await {
            Ok(active) => {
                if guard.still_mounted("active project") {
                    store.active_project().set(active);
                }
            }
            Err(e) => log::error!("failed to load active project: {}", e),
        }
    });
}

pub fn load_stories(api: ApiClient, store: AppStore, guard: MountGuard) {
    spawn_local(async move {
        match api.list_stories().await {
            Ok(stories) => {
                if guard.still_mounted("story list") {
                    log::debug!("loaded {} stories", stories.len());
                    store.stories().set(stories);
                }
            }
            Err(e) => log::error!("failed to load stories: {}", e),
        }
    });
}

pub fn load_tasks(api: ApiClient, store: AppStore, guard: MountGuard) {
    spawn_local(async move {
        match api.list_tasks().await {
            Ok(tasks) => {
                if guard.still_mounted("task list") {
                    log::debug!("loaded {} tasks", tasks.len());
                    store.tasks().set(tasks);
                }
            }
            Err(e) => log::error!("failed to load tasks: {}", e),
        }
    });
}

pub fn load_users(api: ApiClient, store: AppStore, guard: MountGuard) {
    spawn_local(async move {
        match api.list_users().await {
            Ok(users) => {
                if guard.still_mounted("user list") {
                    store.users().set(users);
                }
            }
            Err(e) => log::error!("failed to load users: {}", e),
        }
    });
}
