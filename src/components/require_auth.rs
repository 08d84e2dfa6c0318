//! Route Guard Component

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::context::use_app;

/// Renders `children` only with a session token; otherwise redirects to `/login`
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let app = use_app();

    move || {
        if app.session.is_authenticated() {
            children().into_any()
        } else {
            view! { <Redirect path="/login" /> }.into_any()
        }
    }
}
