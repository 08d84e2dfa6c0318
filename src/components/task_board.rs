//! Task Board Component
//!
//! Kanban view: one column per status. Dragging a card into another column
//! moves the task there and stamps its start / end time.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{
    bind_global_handlers, create_dnd_signals, make_on_card_mouseenter, make_on_lane_mouseenter,
    make_on_mousedown, make_on_mouseleave, DndSignals, DropTarget,
};

use crate::board::{build_lanes, plan_move, Lane};
use crate::components::loaders::{load_stories, load_tasks};
use crate::components::IdSelect;
use crate::context::use_app;
use crate::lifecycle::use_mount_guard;
use crate::models::{Task, WorkStatus};
use crate::store::{store_upsert_task, use_app_store, AppStateStoreFields};

type BoardDnd = DndSignals<String, WorkStatus>;

#[component]
fn BoardCard(task: Task, status: WorkStatus, dnd: BoardDnd) -> impl IntoView {
    let id = task.id.clone();
    let is_dragging = {
        let id = id.clone();
        move || dnd.dragging_id_read.with(|dragging| dragging.as_deref() == Some(id.as_str()))
    };
    let is_target = {
        let id = id.clone();
        move || {
            dnd.drop_target_read
                .with(|target| matches!(target, Some(DropTarget::Card(card)) if *card == id))
        }
    };
    let assigned = task.assigned_user.is_some();
    let priority = task.priority;

    view! {
        <div
            class=move || {
                let mut class = format!("board-card priority-{}", priority);
                if is_dragging() {
                    class.push_str(" dragging");
                }
                if is_target() {
                    class.push_str(" drop-target");
                }
                class
            }
            on:mousedown=make_on_mousedown(dnd, id.clone())
            on:mouseenter=make_on_card_mouseenter(dnd, id.clone())
            on:mouseleave=make_on_lane_mouseenter(dnd, status)
        >
            <div class="board-card-title">{task.name.clone()}</div>
            <div class="board-card-meta">
                {format!("{}h", task.estimated_hours)}
                {assigned.then(|| view! { <span class="board-card-assigned">"●"</span> })}
            </div>
        </div>
    }
}

#[component]
fn BoardLane(lane: Lane, dnd: BoardDnd) -> impl IntoView {
    let status = lane.status;
    let is_target = move || dnd.drop_target_read.with(|target| *target == Some(DropTarget::Lane(status)));
    let count = lane.tasks.len();

    view! {
        <section
            class=move || if is_target() { "board-lane drop-target" } else { "board-lane" }
            on:mouseenter=make_on_lane_mouseenter(dnd, status)
            on:mouseleave=make_on_mouseleave(dnd)
        >
            <header class="board-lane-header">
                <span>{status.label()}</span>
                <span class="board-lane-count">{count}</span>
            </header>
            <div class="board-lane-cards">
                {lane
                    .tasks
                    .into_iter()
                    .map(|task| view! { <BoardCard task=task status=status dnd=dnd /> })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
pub fn TaskBoardPage() -> impl IntoView {
    let app = use_app();
    let store = use_app_store();
    let guard = use_mount_guard();
    let (story_filter, set_story_filter) = signal(String::new());

    load_tasks(app.api(), store, guard.clone());
    load_stories(app.api(), store, guard);

    let dnd: BoardDnd = create_dnd_signals();
    bind_global_handlers(dnd, move |task_id: String, target| {
        let planned = store
            .tasks()
            .with_untracked(|tasks| plan_move(tasks, &task_id, &target, Utc::now()));
        let Some(patch) = planned else {
            return;
        };
        if let Some(status) = patch.status {
            log::debug!("moving task {} to {}", task_id, status);
        }
        let api = app.api();
        spawn_local(async move {
            match api.update_task(&task_id, &patch).await {
                Ok(updated) => store_upsert_task(&store, updated),
                Err(e) => log::error!("failed to move task {}: {}", task_id, e),
            }
        });
    });

    let lanes = Memo::new(move |_| {
        let story = story_filter.get();
        let story = Some(story.as_str()).filter(|s| !s.is_empty());
        store.tasks().with(|tasks| build_lanes(tasks, story))
    });

    let story_choices = Signal::derive(move || {
        store
            .stories()
            .get()
            .into_iter()
            .map(|story| (story.id, story.name))
            .collect::<Vec<_>>()
    });

    view! {
        <div class="page board-page">
            <h1>"Board"</h1>
            <div class="filter-bar">
                <IdSelect
                    placeholder="All stories"
                    choices=story_choices
                    value=story_filter
                    on_change=move |v: String| set_story_filter.set(v)
                />
            </div>
            <div class="board">
                {move || {
                    lanes
                        .get()
                        .into_iter()
                        .map(|lane| view! { <BoardLane lane=lane dnd=dnd /> })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
