//! Navigation Bar Component

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::NotificationBell;
use crate::context::use_app;

/// Top bar: brand, section links, bell, theme toggle, sign in / out
#[component]
pub fn Navbar() -> impl IntoView {
    let app = use_app();
    let session = app.session;
    let theme = app.theme;

    view! {
        <nav class="navbar">
            <div class="navbar-brand">
                <A href="/">"ManageMe"</A>
            </div>
            <ul class="navbar-links">
                <Show
                    when=move || session.is_authenticated()
                    fallback=|| view! { <li><A href="/login">"Login"</A></li> }
                >
                    <li><A href="/">"Projects"</A></li>
                    <li><A href="/active">"Active Project"</A></li>
                    <li><A href="/stories">"Stories"</A></li>
                    <li><A href="/tasks">"Tasks"</A></li>
                    <li><A href="/board">"Board"</A></li>
                    <li><NotificationBell /></li>
                    <li class="navbar-user">
                        {move || session.user().map(|user| user.first_name).unwrap_or_default()}
                    </li>
                    <li>
                        <button type="button" class="logout-btn" on:click=move |_| session.logout()>
                            "Logout"
                        </button>
                    </li>
                </Show>
                <li>
                    <button
                        type="button"
                        class="theme-toggle"
                        title="Toggle theme"
                        on:click=move |_| theme.toggle()
                    >
                        {move || theme.theme().toggle_icon()}
                    </button>
                </li>
            </ul>
        </nav>
    }
}
