//! Terminal user interface.
//!
//! - `loop_runner` - main event loop and terminal management
//! - `input` - keyboard dispatch through the keybinding registry
//! - `events` - background task results
//! - `helpers` - task spawning and panic capture
//! - `render` - frame layout
//! - `genres`, `movies`, `status`, `help` - widgets

mod events;
mod genres;
mod help;
mod helpers;
mod input;
mod loop_runner;
mod movies;
mod render;
mod status;

pub(crate) use helpers::spawn_bootstrap;
pub use loop_runner::{run, Action};
