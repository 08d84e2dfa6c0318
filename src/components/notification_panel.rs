//! Notification Panel Component
//!
//! Dropdown list of notifications, oldest first.

use leptos::prelude::*;

use crate::context::use_app;
use crate::notifications::{use_feed, Notification};

fn item_class(notification: &Notification) -> String {
    let mut class = format!("notification-item priority-{}", notification.priority);
    if !notification.read {
        class.push_str(" unread");
    }
    class
}

/// Notification dropdown; "Clear all" is the only way to delete entries
#[component]
pub fn NotificationPanel(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let app = use_app();
    let notifications = use_feed(&app.notifications().list());

    let clear_all = move |_| app.notifications().clear_all();

    view! {
        <div class="notification-panel">
            <div class="notification-panel-header">
                <span class="notification-panel-title">"Notifications"</span>
                <button
                    type="button"
                    class="notification-clear-btn"
                    disabled=move || notifications.with(Vec::is_empty)
                    on:click=clear_all
                >
                    "Clear all"
                </button>
                <button type="button" class="notification-close-btn" on:click=move |_| on_close.run(())>
                    "×"
                </button>
            </div>
            <ul class="notification-list">
                {move || {
                    let list = notifications.get();
                    if list.is_empty() {
                        view! { <li class="notification-empty">"No notifications"</li> }.into_any()
                    } else {
                        list.iter()
                            .map(|notification| {
                                let date = notification.date.format("%Y-%m-%d %H:%M").to_string();
                                view! {
                                    <li class=item_class(notification)>
                                        <div class="notification-title">{notification.title.clone()}</div>
                                        <p class="notification-message">{notification.message.clone()}</p>
                                        <span class="notification-date">{date}</span>
                                    </li>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }
                }}
            </ul>
        </div>
    }
}
