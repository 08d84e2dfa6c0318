//! Login Page Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;

use crate::context::use_app;
use crate::lifecycle::use_mount_guard;

#[component]
pub fn LoginPage() -> impl IntoView {
    let app = use_app();
    let session = app.session;
    let guard = use_mount_guard();

    let (login, set_login) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (pending, set_pending) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let login = login.get();
        let password = password.get();
        if login.trim().is_empty() || password.is_empty() {
            set_error.set(Some("Login and password are required".to_string()));
            return;
        }
        set_pending.set(true);
        set_error.set(None);
        let guard = guard.clone();
        spawn_local(async move {
            let result = session.login(login.trim(), &password).await;
            if !guard.still_mounted("login") {
                return;
            }
            set_pending.set(false);
            if let Err(e) = result {
                log::error!("login failed: {}", e);
                set_error.set(Some(e.to_string()));
            }
        });
    };

    view! {
        {move || session.is_authenticated().then(|| view! { <Redirect path="/" /> })}
        <div class="login-page">
            <h1>"Login"</h1>
            <form class="login-form" on:submit=submit>
                <input
                    type="text"
                    placeholder="Login"
                    prop:value=move || login.get()
                    on:input=move |ev| set_login.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Signing in..." } else { "Login" }}
                </button>
            </form>
            {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
        </div>
    }
}
