//! UI Components
//!
//! Pages, the navigation bar and the small form widgets they share.

mod loaders;

mod active_project;
mod delete_confirm_button;
mod fields;
mod login;
mod modal;
mod navbar;
mod notification_bell;
mod notification_panel;
mod option_buttons;
mod project_list;
mod require_auth;
mod story_list;
mod task_board;
mod task_list;

pub use active_project::ActiveProjectPage;
pub use delete_confirm_button::{DeleteConfirmButton, DeleteTracker};
pub use fields::{IdSelect, TextField};
pub use login::LoginPage;
pub use modal::Modal;
pub use navbar::Navbar;
pub use notification_bell::NotificationBell;
pub use notification_panel::NotificationPanel;
pub use option_buttons::OptionButtons;
pub use project_list::ProjectListPage;
pub use require_auth::RequireAuth;
pub use story_list::StoryListPage;
pub use task_board::TaskBoardPage;
pub use task_list::TaskListPage;
