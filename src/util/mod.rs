//! Utility functions shared by the API client and the TUI.
//!
//! - **Base URL validation**: normalizes the configured catalog API location
//! - **Text processing**: Unicode-aware width calculation, truncation and
//!   control-character stripping for server-provided strings
//!
//! ```
//! use vidly::util::{display_width, parse_base_url, truncate_to_width};
//!
//! let base = parse_base_url("http://localhost:3900/api").unwrap();
//! assert!(base.as_str().ends_with('/'));
//!
//! assert_eq!(display_width("Airplane"), 8);
//! assert_eq!(truncate_to_width("Wedding Crashers", 10), "Wedding...");
//! ```

mod base_url;
mod text;

pub use base_url::{parse_base_url, BaseUrlError};
pub use text::{display_width, strip_control_chars, truncate_to_width};

/// Maximum search query length accepted from the search box.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 256;
