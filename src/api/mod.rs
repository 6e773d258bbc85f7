//! Catalog service client.
//!
//! Three endpoints relative to the configured base URL:
//!
//! | Method   | Path          | Result        |
//! |----------|---------------|---------------|
//! | `GET`    | `movies`      | `Vec<Movie>`  |
//! | `GET`    | `genres`      | `Vec<Genre>`  |
//! | `DELETE` | `movies/{id}` | `()`          |

mod client;

pub use client::{ApiClient, ApiError, DEFAULT_TIMEOUT};
