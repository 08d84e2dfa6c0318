//! ManageMe Frontend Entry Point

mod api;
mod app;
mod board;
mod components;
mod config;
mod context;
mod lifecycle;
mod logging;
mod models;
mod notifications;
mod session;
mod storage;
mod store;
mod theme;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(AppConfig::from_env().log_level);
    mount_to_body(App);
}
