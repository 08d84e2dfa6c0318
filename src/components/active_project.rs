//! Active Project Component

use leptos::prelude::*;

use crate::components::loaders::load_active_project;
use crate::context::use_app;
use crate::lifecycle::use_mount_guard;
use crate::models::join_tags;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ActiveProjectPage() -> impl IntoView {
    let app = use_app();
    let store = use_app_store();
    let guard = use_mount_guard();

    load_active_project(app.api(), store, guard);

    view! {
        <div class="page active-project-page">
            <h1>"Active Project"</h1>
            {move || match store.active_project().get() {
                Some(project) => view! {
                    <div class="active-project">
                        <h2>{project.name.clone()}</h2>
                        <p>{project.description.clone()}</p>
                        <p class="entity-tags">{join_tags(&project.tags)}</p>
                        <span class=format!("status-badge status-{}", project.status)>
                            {project.status.label()}
                        </span>
                    </div>
                }
                .into_any(),
                None => view! { <p class="empty-state">"No active project selected"</p> }.into_any(),
            }}
        </div>
    }
}
