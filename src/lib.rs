//! Terminal movie catalog browser.
//!
//! The library half holds everything that does not touch the terminal: the
//! catalog domain, the HTTP client and configuration. The `vidly` binary
//! layers the TUI on top.

pub mod api;
pub mod catalog;
pub mod config;
pub mod util;
