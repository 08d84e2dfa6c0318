//! Workspace Data Store
//!
//! Entities loaded from the backend, shared by the list and board views.
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{remove_by_id, upsert_by_id, Project, Story, Task, User};

#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub projects: Vec<Project>,
    pub active_project: Option<Project>,
    pub stories: Vec<Story>,
    pub tasks: Vec<Task>,
    /// Read-only projection for owner / assignee pickers
    pub users: Vec<User>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_upsert_project(store: &AppStore, project: Project) {
    // Keep the active pointer's copy in sync with edits
    let is_active = store
        .active_project()
        .with_untracked(|active| active.as_ref().is_some_and(|p| p.id == project.id));
    if is_active {
        store.active_project().set(Some(project.clone()));
    }
    upsert_by_id(&mut store.projects().write(), project);
}

pub fn store_remove_project(store: &AppStore, project_id: &str) {
    remove_by_id(&mut store.projects().write(), project_id);
    let was_active = store
        .active_project()
        .with_untracked(|active| active.as_ref().is_some_and(|p| p.id == project_id));
    if was_active {
        store.active_project().set(None);
    }
}

pub fn store_upsert_story(store: &AppStore, story: Story) {
    upsert_by_id(&mut store.stories().write(), story);
}

pub fn store_remove_story(store: &AppStore, story_id: &str) {
    remove_by_id(&mut store.stories().write(), story_id);
}

pub fn store_upsert_task(store: &AppStore, task: Task) {
    upsert_by_id(&mut store.tasks().write(), task);
}

pub fn store_remove_task(store: &AppStore, task_id: &str) {
    remove_by_id(&mut store.tasks().write(), task_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectStatus;

    fn make_project(id: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            description: "desc".to_string(),
            tags: Vec::new(),
            status: ProjectStatus::Active,
            created_at: None,
            updated_at: None,
        }
    }

    fn store_with_active(active: &str) -> AppStore {
        let projects = vec![make_project("p1", "One"), make_project("p2", "Two")];
        let active = projects.iter().find(|p| p.id == active).cloned();
        Store::new(AppState {
            projects,
            active_project: active,
            ..AppState::default()
        })
    }

    #[test]
    fn test_editing_active_project_refreshes_active_copy() {
        let store = store_with_active("p1");
        store_upsert_project(&store, make_project("p1", "Renamed"));

        let active = store.active_project().get_untracked();
        assert_eq!(active.map(|p| p.name), Some("Renamed".to_string()));
        assert_eq!(store.projects().get_untracked()[0].name, "Renamed");
    }

    #[test]
    fn test_editing_other_project_keeps_active_copy() {
        let store = store_with_active("p1");
        store_upsert_project(&store, make_project("p2", "Renamed"));

        let active = store.active_project().get_untracked();
        assert_eq!(active.map(|p| p.name), Some("One".to_string()));
    }

    #[test]
    fn test_deleting_active_project_clears_pointer() {
        let store = store_with_active("p2");
        store_remove_project(&store, "p1");
        assert!(store.active_project().get_untracked().is_some());

        store_remove_project(&store, "p2");
        assert_eq!(store.active_project().get_untracked(), None);
        assert!(store.projects().get_untracked().is_empty());
    }
}
