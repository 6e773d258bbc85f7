//! View selection state: filter mode, sort column and page.
//!
//! Every transition returns a new [`SelectionState`]; fields are private so
//! the reset rules cannot be bypassed by direct assignment.

use super::types::{Genre, SortColumn};

/// How the movie list is narrowed before sorting.
///
/// Search text and genre selection are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    NoFilter,
    /// Case-insensitive title prefix. Never empty.
    BySearch(String),
    /// The selected genre. May be the synthetic "All Genres" entry, which
    /// stays selected for display but filters nothing.
    ByGenre(Genre),
}

impl FilterMode {
    /// Current search text, or `""` when not searching.
    pub fn search_query(&self) -> &str {
        match self {
            Self::BySearch(query) => query,
            _ => "",
        }
    }

    /// Currently selected genre, if any.
    pub fn selected_genre(&self) -> Option<&Genre> {
        match self {
            Self::ByGenre(genre) => Some(genre),
            _ => None,
        }
    }
}

/// Complete set of UI-driven view parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    filter: FilterMode,
    sort: SortColumn,
    current_page: usize,
    page_size: usize,
}

impl SelectionState {
    /// Page size used when none is configured.
    pub const DEFAULT_PAGE_SIZE: usize = 4;

    /// Fresh state: no filter, title ascending, page 1.
    ///
    /// A zero page size is raised to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: FilterMode::NoFilter,
            sort: SortColumn::default(),
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn filter(&self) -> &FilterMode {
        &self.filter
    }

    pub fn sort(&self) -> SortColumn {
        self.sort
    }

    /// 1-based page number.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Select a genre: clears the search and returns to page 1.
    #[must_use]
    pub fn select_genre(&self, genre: Genre) -> Self {
        Self {
            filter: FilterMode::ByGenre(genre),
            current_page: 1,
            ..self.clone()
        }
    }

    /// Search by title prefix: clears the genre and returns to page 1.
    ///
    /// An empty query leaves no filter at all.
    #[must_use]
    pub fn search(&self, query: impl Into<String>) -> Self {
        let query = query.into();
        let filter = if query.is_empty() {
            FilterMode::NoFilter
        } else {
            FilterMode::BySearch(query)
        };
        Self {
            filter,
            current_page: 1,
            ..self.clone()
        }
    }

    /// Replace the sort. The page is kept.
    #[must_use]
    pub fn sort_by(&self, sort: SortColumn) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    /// Jump to a page. Page 0 is treated as page 1; pages past the end are
    /// accepted and project to an empty slice.
    #[must_use]
    pub fn go_to_page(&self, page: usize) -> Self {
        Self {
            current_page: page.max(1),
            ..self.clone()
        }
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE_SIZE)
    }
}
