//! Movie catalog domain: data types, view selection, the derived view and
//! optimistic mutations.
//!
//! ```
//! use vidly::catalog::{project, Genre, SelectionState};
//!
//! let selection = SelectionState::default()
//!     .search("term")
//!     .select_genre(Genre::new("g1", "Action"));
//!
//! // Selecting a genre cleared the search and reset the page
//! assert_eq!(selection.filter().search_query(), "");
//! assert_eq!(selection.current_page(), 1);
//!
//! let view = project(&[], &selection);
//! assert_eq!(view.total_count, 0);
//! ```

pub mod bootstrap;
pub mod paging;
mod projector;
mod selection;
mod state;
mod types;

pub use bootstrap::LoadedCatalog;
pub use projector::{filter_movies, project};
pub use selection::{FilterMode, SelectionState};
pub use state::{Catalog, DeleteOutcome, Notifier, PendingDelete};
pub use types::{Genre, GenreId, Movie, MovieId, SortColumn, SortField, SortOrder, ViewResult};
