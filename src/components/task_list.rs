//! Task List Component
//!
//! Create form, task rows, edit modal (assign / mark as done), details modal
//! and delete.

use chrono::{DateTime, Utc};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::loaders::{load_stories, load_tasks, load_users};
use crate::components::{DeleteConfirmButton, DeleteTracker, IdSelect, Modal, OptionButtons, TextField};
use crate::context::{use_app, AppContext};
use crate::lifecycle::use_mount_guard;
use crate::models::{find_by_id, parse_hours, user_name, Priority, Task, TaskDraft, TaskPatch, WorkStatus};
use crate::notifications::Notification;
use crate::store::{store_remove_task, store_upsert_task, use_app_store, AppStateStoreFields, AppStore};

/// Notify when a task was just assigned to the signed-in user
fn notify_if_assigned_to_me(app: &AppContext, task: &Task, previous: Option<&str>) {
    let Some(me) = app.session.user_id() else {
        return;
    };
    if task.is_assigned_to(&me) && previous != Some(me.as_str()) {
        app.notifications().send(Notification::assigned_to_you("task", &task.name, Utc::now()));
    }
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn story_choices(store: AppStore) -> Signal<Vec<(String, String)>> {
    Signal::derive(move || {
        store
            .stories()
            .get()
            .into_iter()
            .map(|story| (story.id, story.name))
            .collect()
    })
}

fn story_name(store: &AppStore, id: &str) -> String {
    store.stories().with(|stories| {
        stories
            .iter()
            .find(|story| story.id == id)
            .map(|story| story.name.clone())
            .unwrap_or_else(|| id.to_string())
    })
}

#[component]
fn PriorityPicker(priority: RwSignal<Priority>) -> impl IntoView {
    let current = Signal::derive(move || priority.get().as_str().to_string());
    view! {
        <OptionButtons
            options=Priority::OPTIONS
            current=current
            on_change=move |v: String| {
                if let Ok(parsed) = v.parse() {
                    priority.set(parsed);
                }
            }
        />
    }
}

#[component]
fn TaskCreateForm() -> impl IntoView {
    let app = use_app();
    let store = use_app_store();
    let guard = use_mount_guard();

    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let priority = RwSignal::new(Priority::default());
    let story = RwSignal::new(String::new());
    let hours = RwSignal::new(String::new());
    let (error, set_error) = signal(None::<String>);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = TaskDraft {
            name: name.get_untracked().trim().to_string(),
            description: description.get_untracked().trim().to_string(),
            priority: priority.get_untracked(),
            story: story.get_untracked(),
            estimated_hours: parse_hours(&hours.get_untracked()).unwrap_or_default(),
            ..TaskDraft::new(Utc::now())
        };
        if !draft.is_complete() {
            set_error.set(Some(
                "Name, description, story and estimated hours are required".to_string(),
            ));
            return;
        }
        let api = app.api();
        let guard = guard.clone();
        spawn_local(async move {
            match api.create_task(&draft).await {
                Ok(task) => {
                    log::info!("created task {}", task.id);
                    store_upsert_task(&store, task);
                    if guard.still_mounted("create task") {
                        name.set(String::new());
                        description.set(String::new());
                        priority.set(Priority::default());
                        hours.set(String::new());
                        set_error.set(None);
                    }
                }
                Err(e) => {
                    log::error!("failed to create task: {}", e);
                    if guard.is_mounted() {
                        set_error.set(Some(e.to_string()));
                    }
                }
            }
        });
    };

    view! {
        <form class="entity-form" on:submit=submit>
            <h2>"New Task"</h2>
            <TextField placeholder="Name" value=name on_input=move |v: String| name.set(v) />
            <TextField placeholder="Description" value=description on_input=move |v: String| description.set(v) />
            <IdSelect
                placeholder="Story"
                choices=story_choices(store)
                value=story
                on_change=move |v: String| story.set(v)
            />
            <TextField
                placeholder="Estimated hours"
                value=hours
                on_input=move |v: String| hours.set(v)
                numeric=true
            />
            <PriorityPicker priority=priority />
            <button type="submit">"Add Task"</button>
            {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
        </form>
    }
}

/// Edits a working copy of the task; nothing is sent until "Save"
#[component]
fn TaskEditModal(task: Task, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let app = use_app();
    let store = use_app_store();
    let guard = use_mount_guard();
    let previous_assignee = task.assigned_user.clone();

    let name = RwSignal::new(task.name.clone());
    let description = RwSignal::new(task.description.clone());
    let priority = RwSignal::new(task.priority);
    let story = RwSignal::new(task.story.clone());
    let hours = RwSignal::new(task.estimated_hours.to_string());
    let assignee = RwSignal::new(task.assigned_user.clone().unwrap_or_default());
    let working = RwSignal::new(task);
    let (error, set_error) = signal(None::<String>);

    let user_choices = Signal::derive(move || {
        store
            .users()
            .get()
            .into_iter()
            .map(|user| (user.id, user.first_name))
            .collect::<Vec<_>>()
    });

    let assign = move |_| {
        let user = assignee.get_untracked();
        if user.is_empty() {
            return;
        }
        working.update(|task| task.assign(&user, Utc::now()));
    };

    let mark_done = move |_| working.update(|task| task.complete(Utc::now()));

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(estimated_hours) = parse_hours(&hours.get_untracked()).filter(|h| *h > 0.0) else {
            set_error.set(Some("Estimated hours must be a positive number".to_string()));
            return;
        };
        let mut task = working.get_untracked();
        task.name = name.get_untracked().trim().to_string();
        task.description = description.get_untracked().trim().to_string();
        task.priority = priority.get_untracked();
        task.story = story.get_untracked();
        task.estimated_hours = estimated_hours;
        if task.name.is_empty() || task.description.is_empty() || task.story.is_empty() {
            set_error.set(Some("Name, description and story are required".to_string()));
            return;
        }

        let patch = TaskPatch::from(&task);
        let api = app.api();
        let guard = guard.clone();
        let previous = previous_assignee.clone();
        spawn_local(async move {
            match api.update_task(&task.id, &patch).await {
                Ok(updated) => {
                    notify_if_assigned_to_me(&app, &updated, previous.as_deref());
                    store_upsert_task(&store, updated);
                    if guard.still_mounted("update task") {
                        on_close.run(());
                    }
                }
                Err(e) => {
                    log::error!("failed to update task {}: {}", task.id, e);
                    if guard.is_mounted() {
                        set_error.set(Some(e.to_string()));
                    }
                }
            }
        });
    };

    view! {
        <Modal title="Edit Task" on_close=on_close>
            <form class="entity-form" on:submit=submit>
                <TextField placeholder="Name" value=name on_input=move |v: String| name.set(v) />
                <TextField
                    placeholder="Description"
                    value=description
                    on_input=move |v: String| description.set(v)
                />
                <IdSelect
                    placeholder="Story"
                    choices=story_choices(store)
                    value=story
                    on_change=move |v: String| story.set(v)
                />
                <TextField
                    placeholder="Estimated hours"
                    value=hours
                    on_input=move |v: String| hours.set(v)
                    numeric=true
                />
                <PriorityPicker priority=priority />
                <div class="task-assign">
                    <IdSelect
                        placeholder="Assign user"
                        choices=user_choices
                        value=assignee
                        on_change=move |v: String| assignee.set(v)
                    />
                    <button type="button" on:click=assign>"Assign"</button>
                    <button
                        type="button"
                        disabled=move || working.with(|task| task.status == WorkStatus::Done)
                        on:click=mark_done
                    >
                        "Mark as done"
                    </button>
                </div>
                <p class="task-state">
                    {move || working.with(|task| {
                        format!(
                            "{} · started {} · finished {}",
                            task.status.label(),
                            format_date(task.start_date),
                            format_date(task.end_date),
                        )
                    })}
                </p>
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
fn TaskDetailsModal(task: Task, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let store = use_app_store();
    let story = story_name(&store, &task.story);
    let assignee = task.assigned_user.clone();
    let assignee_name = move || match &assignee {
        Some(id) => store.users().with(|users| user_name(users, id).to_string()),
        None => "Unassigned".to_string(),
    };

    view! {
        <Modal title=task.name.clone() on_close=on_close>
            <dl class="task-details">
                <dt>"Description"</dt>
                <dd>{task.description.clone()}</dd>
                <dt>"Priority"</dt>
                <dd>{task.priority.label()}</dd>
                <dt>"Story"</dt>
                <dd>{story}</dd>
                <dt>"Estimated hours"</dt>
                <dd>{task.estimated_hours.to_string()}</dd>
                <dt>"Status"</dt>
                <dd>{task.status.label()}</dd>
                <dt>"Created"</dt>
                <dd>{format_date(Some(task.created_at))}</dd>
                <dt>"Started"</dt>
                <dd>{format_date(task.start_date)}</dd>
                <dt>"Finished"</dt>
                <dd>{format_date(task.end_date)}</dd>
                <dt>"Assigned to"</dt>
                <dd>{assignee_name}</dd>
            </dl>
        </Modal>
    }
}

/// Which modal is open over the list, by task id
#[derive(Clone)]
enum TaskModal {
    Edit(String),
    Details(String),
}

/// Everything a row renders or hands to a modal; any change rebuilds the row
#[derive(Clone, PartialEq, Eq, Hash)]
struct TaskRowKey {
    id: String,
    name: String,
    description: String,
    priority: Priority,
    story: String,
    hours_bits: u64,
    status: WorkStatus,
    created_at: DateTime<Utc>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    assigned_user: Option<String>,
}

impl From<&Task> for TaskRowKey {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            description: task.description.clone(),
            priority: task.priority,
            story: task.story.clone(),
            hours_bits: task.estimated_hours.to_bits(),
            status: task.status,
            created_at: task.created_at,
            start_date: task.start_date,
            end_date: task.end_date,
            assigned_user: task.assigned_user.clone(),
        }
    }
}

#[component]
pub fn TaskListPage() -> impl IntoView {
    let app = use_app();
    let store = use_app_store();
    let guard = use_mount_guard();
    let (modal, set_modal) = signal(None::<TaskModal>);

    load_tasks(app.api(), store, guard.clone());
    load_stories(app.api(), store, guard.clone());
    load_users(app.api(), store, guard.clone());

    let deletes = DeleteTracker::new();
    let delete_task = move |id: String| {
        let api = app.api();
        let guard = guard.clone();
        deletes.start(&id);
        spawn_local(async move {
            let result = api.delete_task(&id).await;
            match &result {
                Ok(()) => {
                    log::info!("deleted task {}", id);
                    store_remove_task(&store, &id);
                }
                Err(e) => log::error!("failed to delete task {}: {}", id, e),
            }
            if guard.is_mounted() {
                deletes.finish(&id, result.is_ok());
            }
        });
    };

    // Modals open on the store's copy at the time of the click
    let current_task = move |id: &str| store.tasks().with_untracked(|tasks| find_by_id(tasks, id).cloned());

    view! {
        <div class="page task-list-page">
            <h1>"Tasks"</h1>
            <TaskCreateForm />
            <ul class="entity-list">
                <For
                    each=move || store.tasks().get()
                    key=|task| TaskRowKey::from(task)
                    children=move |task| {
                        let id = task.id.clone();
                        let row_id = id.clone();
                        let edit_id = id.clone();
                        let details_id = id.clone();
                        let delete_task = delete_task.clone();
                        let story = task.story.clone();
                        view! {
                            <li class="entity-row">
                                <div class="entity-main">
                                    <span class="entity-name">{task.name.clone()}</span>
                                    <span class=format!("priority-badge priority-{}", task.priority)>
                                        {task.priority.label()}
                                    </span>
                                    <span class=format!("status-badge status-{}", task.status)>
                                        {task.status.label()}
                                    </span>
                                    <span class="entity-meta">
                                        {move || story_name(&store, &story)}
                                        {format!(" · {}h", task.estimated_hours)}
                                    </span>
                                </div>
                                <div class="entity-actions">
                                    <button
                                        type="button"
                                        on:click=move |_| set_modal.set(Some(TaskModal::Details(details_id.clone())))
                                    >
                                        "Details"
                                    </button>
                                    <button
                                        type="button"
                                        on:click=move |_| set_modal.set(Some(TaskModal::Edit(edit_id.clone())))
                                    >
                                        "Edit"
                                    </button>
                                    <DeleteConfirmButton
                                        id=row_id
                                        tracker=deletes
                                        button_class="delete-btn"
                                        on_confirm=move |_: ()| delete_task(id.clone())
                                    />
                                </div>
                            </li>
                        }
                    }
                />
            </ul>
            {move || modal.get().and_then(|open| match open {
                TaskModal::Edit(id) => current_task(&id).map(|task| view! {
                    <TaskEditModal task=task on_close=move |_: ()| set_modal.set(None) />
                }
                .into_any()),
                TaskModal::Details(id) => current_task(&id).map(|task| view! {
                    <TaskDetailsModal task=task on_close=move |_: ()| set_modal.set(None) />
                }
                .into_any()),
            })}
        </div>
    }
}
