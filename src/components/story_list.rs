//! Story List Component
//!
//! Create form, story rows, edit modal and delete. Giving a story to the
//! signed-in user posts a notification.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ProjectFilter;
use crate::components::loaders::{load_active_project, load_projects, load_stories, load_users};
use crate::components::{DeleteConfirmButton, DeleteTracker, IdSelect, Modal, OptionButtons, TextField};
use crate::context::{use_app, AppContext};
use crate::lifecycle::use_mount_guard;
use crate::models::{user_name, Priority, Story, StoryDraft, WorkStatus};
use crate::notifications::Notification;
use crate::store::{store_remove_story, store_upsert_story, use_app_store, AppStateStoreFields, AppStore};

#[derive(Clone, Copy)]
struct StoryForm {
    name: RwSignal<String>,
    description: RwSignal<String>,
    priority: RwSignal<Priority>,
    project: RwSignal<String>,
    status: RwSignal<WorkStatus>,
    owner: RwSignal<String>,
}

impl StoryForm {
    fn new(draft: &StoryDraft) -> Self {
        Self {
            name: RwSignal::new(draft.name.clone()),
            description: RwSignal::new(draft.description.clone()),
            priority: RwSignal::new(draft.priority),
            project: RwSignal::new(draft.project.clone()),
            status: RwSignal::new(draft.status),
            owner: RwSignal::new(draft.owner.clone()),
        }
    }

    /// Draft from the current field values; `created_at` is kept from `base`
    fn draft(&self, base: &StoryDraft) -> StoryDraft {
        StoryDraft {
            name: self.name.get_untracked().trim().to_string(),
            description: self.description.get_untracked().trim().to_string(),
            priority: self.priority.get_untracked(),
            project: self.project.get_untracked(),
            status: self.status.get_untracked(),
            owner: self.owner.get_untracked(),
            created_at: base.created_at,
        }
    }

    fn reset(&self, project: Option<&str>) {
        self.name.set(String::new());
        self.description.set(String::new());
        self.priority.set(Priority::default());
        self.project.set(project.unwrap_or_default().to_string());
        self.status.set(WorkStatus::default());
        self.owner.set(String::new());
    }
}

/// Notify when a story was just given to the signed-in user
fn notify_if_mine(app: &AppContext, story: &Story, previous_owner: Option<&str>) {
    let Some(me) = app.session.user_id() else {
        return;
    };
    if story.owner == me && previous_owner != Some(me.as_str()) {
        app.notifications().send(Notification::assigned_to_you("story", &story.name, Utc::now()));
    }
}

fn active_project_id(store: &AppStore) -> Option<String> {
    store.active_project().with_untracked(|active| active.as_ref().map(|p| p.id.clone()))
}

#[component]
fn StoryFields(form: StoryForm) -> impl IntoView {
    let store = use_app_store();
    let project_choices = Signal::derive(move || {
        store
            .projects()
            .get()
            .into_iter()
            .map(|project| (project.id, project.name))
            .collect::<Vec<_>>()
    });
    let owner_choices = Signal::derive(move || {
        store
            .users()
            .get()
            .into_iter()
            .map(|user| (user.id, user.first_name))
            .collect::<Vec<_>>()
    });
    let priority = Signal::derive(move || form.priority.get().as_str().to_string());
    let status = Signal::derive(move || form.status.get().as_str().to_string());

    view! {
        <TextField placeholder="Name" value=form.name on_input=move |v: String| form.name.set(v) />
        <TextField
            placeholder="Description"
            value=form.description
            on_input=move |v: String| form.description.set(v)
        />
        <IdSelect
            placeholder="Project"
            choices=project_choices
            value=form.project
            on_change=move |v: String| form.project.set(v)
        />
        <IdSelect
            placeholder="Owner"
            choices=owner_choices
            value=form.owner
            on_change=move |v: String| form.owner.set(v)
        />
        <OptionButtons
            options=Priority::OPTIONS
            current=priority
            on_change=move |v: String| {
                if let Ok(parsed) = v.parse() {
                    form.priority.set(parsed);
                }
            }
        />
        <OptionButtons
            options=WorkStatus::OPTIONS
            current=status
            on_change=move |v: String| {
                if let Ok(parsed) = v.parse() {
                    form.status.set(parsed);
                }
            }
        />
    }
}

#[component]
fn StoryCreateForm() -> impl IntoView {
    let app = use_app();
    let store = use_app_store();
    let guard = use_mount_guard();
    let form = StoryForm::new(&StoryDraft::new(active_project_id(&store).as_deref(), Utc::now()));
    let (error, set_error) = signal(None::<String>);

    // The active project may arrive after the form is built
    Effect::new(move |_| {
        let active = store.active_project().with(|active| active.as_ref().map(|p| p.id.clone()));
        if let Some(id) = active {
            if form.project.get_untracked().is_empty() {
                form.project.set(id);
            }
        }
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.draft(&StoryDraft::new(None, Utc::now()));
        if !draft.is_complete() {
            set_error.set(Some("Name, description, project and owner are required".to_string()));
            return;
        }
        let api = app.api();
        let guard = guard.clone();
        spawn_local(async move {
            match api.create_story(&draft).await {
                Ok(story) => {
                    log::info!("created story {}", story.id);
                    notify_if_mine(&app, &story, None);
                    store_upsert_story(&store, story);
                    if guard.still_mounted("create story") {
                        form.reset(active_project_id(&store).as_deref());
                        set_error.set(None);
                    }
                }
                Err(e) => {
                    log::error!("failed to create story: {}", e);
                    if guard.is_mounted() {
                        set_error.set(Some(e.to_string()));
                    }
                }
            }
        });
    };

    view! {
        <form class="entity-form" on:submit=submit>
            <h2>"New Story"</h2>
            <StoryFields form=form />
            <button type="submit">"Add Story"</button>
            {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
        </form>
    }
}

#[component]
fn StoryEditModal(story: Story, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let app = use_app();
    let store = use_app_store();
    let guard = use_mount_guard();
    let base = StoryDraft::from(&story);
    let form = StoryForm::new(&base);
    let (error, set_error) = signal(None::<String>);
    let story_id = story.id;
    let previous_owner = story.owner;

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.draft(&base);
        if !draft.is_complete() {
            set_error.set(Some("Name, description, project and owner are required".to_string()));
            return;
        }
        let api = app.api();
        let guard = guard.clone();
        let id = story_id.clone();
        let previous_owner = previous_owner.clone();
        spawn_local(async move {
            match api.update_story(&id, &draft).await {
                Ok(updated) => {
                    notify_if_mine(&app, &updated, Some(previous_owner.as_str()));
                    store_upsert_story(&store, updated);
                    if guard.still_mounted("update story") {
                        on_close.run(());
                    }
                }
                Err(e) => {
                    log::error!("failed to update story {}: {}", id, e);
                    if guard.is_mounted() {
                        set_error.set(Some(e.to_string()));
                    }
                }
            }
        });
    };

    view! {
        <Modal title="Edit Story" on_close=on_close>
            <form class="entity-form" on:submit=submit>
                <StoryFields form=form />
                <div class="modal-actions">
                    <button type="submit">"Save"</button>
                    <button type="button" on:click=move |_| on_close.run(())>"Cancel"</button>
                </div>
                {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
            </form>
        </Modal>
    }
}

#[component]
pub fn StoryListPage() -> impl IntoView {
    let app = use_app();
    let store = use_app_store();
    let guard = use_mount_guard();
    let (editing, set_editing) = signal(None::<Story>);

    load_stories(app.api(), store, guard.clone());
    load_projects(app.api(), store, guard.clone(), ProjectFilter::default());
    load_users(app.api(), store, guard.clone());
    load_active_project(app.api(), store, guard.clone());

    let deletes = DeleteTracker::new();
    let delete_story = {
        let guard = guard.clone();
        move |id: String| {
            let api = app.api();
            let guard = guard.clone();
            deletes.start(&id);
            spawn_local(async move {
                let result = api.delete_story(&id).await;
                match &result {
                    Ok(()) => {
                        log::info!("deleted story {}", id);
                        store_remove_story(&store, &id);
                    }
                    Err(e) => log::error!("failed to delete story {}: {}", id, e),
                }
                if guard.is_mounted() {
                    deletes.finish(&id, result.is_ok());
                }
            });
        }
    };

    let project_name = move |id: &str| {
        store.projects().with(|projects| {
            projects
                .iter()
                .find(|project| project.id == id)
                .map(|project| project.name.clone())
                .unwrap_or_else(|| id.to_string())
        })
    };

    view! {
        <div class="page story-list-page">
            <h1>"Stories"</h1>
            <StoryCreateForm />
            <ul class="entity-list">
                <For
                    each=move || store.stories().get()
                    key=|story| {
                        (
                            story.id.clone(),
                            story.name.clone(),
                            story.description.clone(),
                            story.owner.clone(),
                            story.project.clone(),
                            story.priority,
                            story.status,
                        )
                    }
                    children=move |story| {
                        let id = story.id.clone();
                        let owner = story.owner.clone();
                        let project = story.project.clone();
                        let owner_name = move || store.users().with(|users| user_name(users, &owner).to_string());
                        let edit_target = story.clone();
                        let delete_story = delete_story.clone();
                        let row_id = id.clone();
                        view! {
                            <li class="entity-row">
                                <div class="entity-main">
                                    <span class="entity-name">{story.name.clone()}</span>
                                    <span class=format!("priority-badge priority-{}", story.priority)>
                                        {story.priority.label()}
                                    </span>
                                    <span class=format!("status-badge status-{}", story.status)>
                                        {story.status.label()}
                                    </span>
                                    <p class="entity-description">{story.description.clone()}</p>
                                    <span class="entity-meta">
                                        {move || project_name(&project)} " · " {owner_name}
                                    </span>
                                </div>
                                <div class="entity-actions">
                                    <button
                                        type="button"
                                        on:click=move |_| set_editing.set(Some(edit_target.clone()))
                                    >
                                        "Edit"
                                    </button>
                                    <DeleteConfirmButton
                                        id=row_id
                                        tracker=deletes
                                        button_class="delete-btn"
                                        on_confirm=move |_: ()| delete_story(id.clone())
                                    />
                                </div>
                            </li>
                        }
                    }
                />
            </ul>
            {move || editing.get().map(|story| view! {
                <StoryEditModal story=story on_close=move |_: ()| set_editing.set(None) />
            })}
        </div>
    }
}
