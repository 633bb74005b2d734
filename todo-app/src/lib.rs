//! Single-page to-do list served with axum-live.
//!
//! Each browser connection gets its own [`AppRoot`]: click an item to remove
//! it, shift-click to edit it in place, type into the input row to add more.

pub mod app;
pub mod config;
pub mod info;
pub mod item;
pub mod list;
pub mod store;

pub use app::{AppMsg, AppRoot};
pub use config::{Config, ConfigError};
pub use store::{Todo, TodoId, TodoStore};

use axum::Router;
use axum_live::LiveApp;

pub const TITLE: &str = "ReactPy ToDo";

/// Router serving the page, the session socket and the client script.
pub fn router() -> Router {
    LiveApp::new(AppRoot::default).title(TITLE).router()
}
