//! Console rendering adapter.
//!
//! Stands in for the pages: each line is a user action, each reply is what
//! the affected view would show.

mod app;
mod command;
mod render;

pub use app::{ConsoleApp, ConsoleError, Reply};
pub use command::{parse_value, ConsoleCommand};
pub use render::{render_decision, render_profile, render_user, render_view};
