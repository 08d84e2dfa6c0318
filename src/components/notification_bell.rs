//! Notification Bell Component
//!
//! Bell icon with unread badge; opening the panel marks everything as read.

use leptos::prelude::*;

use crate::components::NotificationPanel;
use crate::context::use_app;
use crate::notifications::use_feed;

#[component]
pub fn NotificationBell() -> impl IntoView {
    let app = use_app();
    let unread = use_feed(&app.notifications().unread_count());
    let (open, set_open) = signal(false);

    let toggle = move |_| {
        let opening = !open.get_untracked();
        if opening {
            // Seen, not deleted
            app.notifications().mark_all_as_read();
        }
        set_open.set(opening);
    };

    view! {
        <div class="notification-bell">
            <button type="button" class="bell-btn" title="Notifications" on:click=toggle>
                "🔔"
                <Show when=move || { unread.get() > 0 }>
                    <span class="bell-badge">{move || unread.get()}</span>
                </Show>
            </button>
            <Show when=move || open.get()>
                <NotificationPanel on_close=move |_: ()| set_open.set(false) />
            </Show>
        </div>
    }
}
