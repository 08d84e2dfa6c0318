//! Project List Component
//!
//! Create form, tag / status filter, project rows with edit, delete and
//! "Set active" actions.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ProjectFilter;
use crate::components::loaders::{load_active_project, load_projects};
use crate::components::{DeleteConfirmButton, DeleteTracker, IdSelect, Modal, OptionButtons, TextField};
use crate::context::use_app;
use crate::lifecycle::use_mount_guard;
use crate::models::{join_tags, parse_tags, Project, ProjectDraft, ProjectStatus};
use crate::store::{store_remove_project, store_upsert_project, use_app_store, AppStateStoreFields};

/// Editable project fields bound to form controls
#[derive(Clone, Copy)]
struct ProjectForm {
    name: RwSignal<String>,
    description: RwSignal<String>,
    tags: RwSignal<String>,
    status: RwSignal<ProjectStatus>,
}

impl ProjectForm {
    fn new(draft: &ProjectDraft) -> Self {
        Self {
            name: RwSignal::new(draft.name.clone()),
            description: RwSignal::new(draft.description.clone()),
            tags: RwSignal::new(join_tags(&draft.tags)),
            status: RwSignal::new(draft.status),
        }
    }

    fn draft(&self) -> ProjectDraft {
        ProjectDraft {
            name: self.name.get_untracked().trim().to_string(),
            description: self.description.get_untracked().trim().to_string(),
            tags: parse_tags(&self.tags.get_untracked()),
            status: self.status.get_untracked(),
        }
    }

    fn reset(&self) {
        self.name.set(String::new());
        self.description.set(String::new());
        self.tags.set(String::new());
        self.status.set(ProjectStatus::default());
    }
}

#[component]
fn ProjectFields(form: ProjectForm) -> impl IntoView {
    let status = Signal::derive(move || form.status.get().as_str().to_string());
    view! {
        <TextField placeholder="Name" value=form.name on_input=move |v: String| form.name.set(v) />
        <TextField
            placeholder="Description"
            value=form.description
            on_input=move |v: String| form.description.set(v)
        />
        <TextField placeholder="Tags (comma separated)" value=form.tags on_input=move |v: String| form.tags.set(v) />
        <OptionButtons
            options=ProjectStatus::OPTIONS
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
fn ProjectCreateForm() -> impl IntoView {
    let app = use_app();
    let store = use_app_store();
    let guard = use_mount_guard();
    let form = ProjectForm::new(&ProjectDraft::default());
    let (error, set_error) = signal(None::<String>);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.draft();
        if !draft.is_complete() {
            set_error.set(Some("Name and description are required".to_string()));
            return;
        }
        let api = app.api();
        let guard = guard.clone();
        spawn_local(async move {
            match api.create_project(&draft).await {
                Ok(project) => {
                    if guard.still_mounted("create project") {
                        log::info!("created project {}", project.id);
                        store_upsert_project(&store, project);
                        form.reset();
                        set_error.set(None);
                    }
                }
                Err(e) => {
                    log::error!("failed to create project: {}", e);
                    if guard.is_mounted() {
                        set_error.set(Some(e.to_string()));
                    }
                }
            }
        });
    };

    view! {
        <form class="entity-form" on:submit=submit>
            <h2>"New Project"</h2>
            <ProjectFields form=form />
            <button type="submit">"Add Project"</button>
            {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
        </form>
    }
}

#[component]
fn ProjectEditModal(project: Project, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let app = use_app();
    let store = use_app_store();
    let guard = use_mount_guard();
    let form = ProjectForm::new(&ProjectDraft::from(&project));
    let (error, set_error) = signal(None::<String>);
    let project_id = project.id;

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.draft();
        if !draft.is_complete() {
            set_error.set(Some("Name and description are required".to_string()));
            return;
        }
        let api = app.api();
        let guard = guard.clone();
        let id = project_id.clone();
        spawn_local(async move {
            match api.update_project(&id, &draft).await {
                Ok(updated) => {
                    store_upsert_project(&store, updated);
                    if guard.still_mounted("update project") {
                        on_close.run(());
                    }
                }
                Err(e) => {
                    log::error!("failed to update project {}: {}", id, e);
                    if guard.is_mounted() {
                        set_error.set(Some(e.to_string()));
                    }
                }
            }
        });
    };

    view! {
        <Modal title="Edit Project" on_close=on_close>
            <form class="entity-form" on:submit=submit>
                <ProjectFields form=form />
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
fn ProjectFilterBar(filter: RwSignal<ProjectFilter>) -> impl IntoView {
    let (tag, set_tag) = signal(String::new());
    let (status, set_status) = signal(String::new());
    let status_choices = Signal::derive(|| {
        ProjectStatus::OPTIONS
            .iter()
            .map(|(value, label)| (value.to_string(), label.to_string()))
            .collect::<Vec<_>>()
    });

    let apply = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let tag = tag.get_untracked();
        filter.set(ProjectFilter {
            tag: Some(tag.trim().to_string()).filter(|t| !t.is_empty()),
            status: status.get_untracked().parse().ok(),
        });
    };

    let reset = move |_| {
        set_tag.set(String::new());
        set_status.set(String::new());
        filter.set(ProjectFilter::default());
    };

    view! {
        <form class="filter-bar" on:submit=apply>
            <TextField placeholder="Filter by tag" value=tag on_input=move |v: String| set_tag.set(v) />
            <IdSelect
                placeholder="Any status"
                choices=status_choices
                value=status
                on_change=move |v: String| set_status.set(v)
            />
            <button type="submit">"Filter"</button>
            <button type="button" on:click=reset>"Reset"</button>
        </form>
    }
}

#[component]
pub fn ProjectListPage() -> impl IntoView {
    let app = use_app();
    let store = use_app_store();
    let guard = use_mount_guard();
    let filter = RwSignal::new(ProjectFilter::default());
    let (editing, set_editing) = signal(None::<Project>);

    // Reload whenever the applied filter changes
    let load_guard = guard.clone();
    Effect::new(move |_| load_projects(app.api(), store, load_guard.clone(), filter.get()));
    load_active_project(app.api(), store, guard.clone());

    let open_editor = {
        let guard = guard.clone();
        move |id: String| {
            // Edit from the server copy, not the possibly stale list row
            let api = app.api();
            let guard = guard.clone();
            spawn_local(async move {
                match api.get_project(&id).await {
                    Ok(project) => {
                        if guard.still_mounted("project details") {
                            set_editing.set(Some(project));
                        }
                    }
                    Err(e) => log::error!("failed to load project {}: {}", id, e),
                }
            });
        }
    };

    let deletes = DeleteTracker::new();
    let delete_project = {
        let guard = guard.clone();
        move |id: String| {
            let api = app.api();
            let guard = guard.clone();
            deletes.start(&id);
            spawn_local(async move {
                let result = api.delete_project(&id).await;
                match &result {
                    Ok(()) => {
                        log::info!("deleted project {}", id);
                        store_remove_project(&store, &id);
                    }
                    Err(e) => log::error!("failed to delete project {}: {}", id, e),
                }
                if guard.is_mounted() {
                    deletes.finish(&id, result.is_ok());
                }
            });
        }
    };

    let set_active = move |id: String| {
        let api = app.api();
        spawn_local(async move {
            match api.set_active_project(&id).await {
                Ok(project) => {
                    log::info!("active project is now {}", project.id);
                    store.active_project().set(Some(project));
                }
                Err(e) => log::error!("failed to set active project {}: {}", id, e),
            }
        });
    };

    let active_id = move || store.active_project().with(|active| active.as_ref().map(|p| p.id.clone()));

    view! {
        <div class="page project-list-page">
            <h1>"Projects"</h1>
            <ProjectCreateForm />
            <ProjectFilterBar filter=filter />
            <ul class="entity-list">
                <For
                    each=move || store.projects().get()
                    key=|project| {
                        (
                            project.id.clone(),
                            project.name.clone(),
                            project.description.clone(),
                            project.tags.clone(),
                            project.status,
                        )
                    }
                    children=move |project| {
                        let id = project.id.clone();
                        let is_active = {
                            let id = id.clone();
                            move || active_id().as_deref() == Some(id.as_str())
                        };
                        let edit_id = id.clone();
                        let active_target = id.clone();
                        let open_editor = open_editor.clone();
                        let delete_project = delete_project.clone();
                        let row_id = id.clone();
                        let tags = join_tags(&project.tags);
                        view! {
                            <li class=move || if is_active() { "entity-row active" } else { "entity-row" }>
                                <div class="entity-main">
                                    <span class="entity-name">{project.name.clone()}</span>
                                    <span class=format!("status-badge status-{}", project.status)>
                                        {project.status.label()}
                                    </span>
                                    <p class="entity-description">{project.description.clone()}</p>
                                    {(!tags.is_empty()).then(|| view! { <span class="entity-tags">{tags}</span> })}
                                </div>
                                <div class="entity-actions">
                                    <button type="button" on:click=move |_| open_editor(edit_id.clone())>
                                        "Edit"
                                    </button>
                                    <button
                                        type="button"
                                        on:click=move |_| set_active(active_target.clone())
                                    >
                                        "Set active"
                                    </button>
                                    <DeleteConfirmButton
                                        id=row_id
                                        tracker=deletes
                                        button_class="delete-btn"
                                        on_confirm=move |_: ()| delete_project(id.clone())
                                    />
                                </div>
                            </li>
                        }
                    }
                />
            </ul>
            {move || editing.get().map(|project| view! {
                <ProjectEditModal project=project on_close=move |_: ()| set_editing.set(None) />
            })}
        </div>
    }
}
