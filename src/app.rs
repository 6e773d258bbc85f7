use crate::keybindings::KeybindingRegistry;
use crate::theme::{StyleMap, ThemeVariant};
use ratatui::style::Style;
use std::borrow::Cow;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};
use vidly::api::{ApiClient, ApiError};
use vidly::catalog::{
    paging, Catalog, Genre, LoadedCatalog, Movie, Notifier, PendingDelete, SelectionState,
    SortField, ViewResult,
};
use vidly::util::MAX_SEARCH_QUERY_LENGTH;

// ============================================================================
// Status Line
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    /// How long a message of this kind stays on screen.
    fn lifetime(self) -> Duration {
        match self {
            Self::Info => Duration::from_secs(3),
            Self::Error => Duration::from_secs(6),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: Cow<'static, str>,
    pub kind: StatusKind,
    set_at: Instant,
}

/// Single-line status area. Info messages expire after 3 seconds, errors
/// after 6.
#[derive(Debug, Default)]
pub struct StatusLine {
    message: Option<StatusMessage>,
}

impl StatusLine {
    pub fn info(&mut self, text: impl Into<Cow<'static, str>>) {
        self.set(text.into(), StatusKind::Info);
    }

    pub fn error(&mut self, text: impl Into<Cow<'static, str>>) {
        self.set(text.into(), StatusKind::Error);
    }

    fn set(&mut self, text: Cow<'static, str>, kind: StatusKind) {
        self.message = Some(StatusMessage {
            text,
            kind,
            set_at: Instant::now(),
        });
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    /// Drop the message once its lifetime has passed.
    /// Returns true if a message was cleared.
    pub fn clear_expired(&mut self) -> bool {
        let expired = self
            .message
            .as_ref()
            .is_some_and(|m| m.set_at.elapsed() >= m.kind.lifetime());
        if expired {
            self.message = None;
        }
        expired
    }
}

impl Notifier for StatusLine {
    fn notify_error(&mut self, message: String) {
        self.error(message);
    }
}

// ============================================================================
// Events & Focus
// ============================================================================

/// Events from background tasks.
#[derive(Debug)]
pub enum AppEvent {
    CatalogLoaded(LoadedCatalog),
    CatalogLoadFailed(ApiError),
    /// The server answered (or failed to answer) an optimistic delete.
    DeleteFinished {
        pending: PendingDelete,
        result: Result<(), ApiError>,
    },
}

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Genres,
    #[default]
    Movies,
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    pub api: ApiClient,
    pub catalog: Catalog,

    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,
    pub keybindings: KeybindingRegistry,

    pub focus: Focus,
    /// Cursor in the genre list
    pub genre_cursor: usize,
    /// Cursor row within the current page of movies
    pub movie_cursor: usize,

    /// Search box has keyboard focus.
    pub search_mode: bool,
    pub search_input: String,

    /// Initial catalog load in flight.
    pub loading: bool,
    /// Optimistic deletes awaiting the server.
    pub deletes_in_flight: usize,
    pub bootstrap_handle: Option<JoinHandle<()>>,
    /// Spinner animation frame while requests are in flight.
    pub spinner_frame: usize,

    pub status: StatusLine,
    /// Set whenever state changes; the loop only draws when true.
    pub needs_redraw: bool,

    pub show_help: bool,
    pub help_scroll_offset: usize,
}

impl App {
    pub fn new(api: ApiClient, selection: SelectionState) -> Self {
        let variant = ThemeVariant::default();
        Self {
            api,
            catalog: Catalog::new(selection),
            theme_variant: variant,
            theme: StyleMap::from_palette(&variant.palette()),
            keybindings: KeybindingRegistry::new(),
            focus: Focus::default(),
            genre_cursor: 0,
            movie_cursor: 0,
            search_mode: false,
            search_input: String::new(),
            loading: false,
            deletes_in_flight: 0,
            bootstrap_handle: None,
            spinner_frame: 0,
            status: StatusLine::default(),
            needs_redraw: true,
            show_help: false,
            help_scroll_offset: 0,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Dark → Light → Dark. Returns the new theme's name.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status.info(msg);
    }

    pub fn clear_expired_status(&mut self) -> bool {
        self.status.clear_expired()
    }

    /// True while any request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.loading || self.deletes_in_flight > 0
    }

    // ========================================================================
    // Derived view
    // ========================================================================

    pub fn view(&self) -> ViewResult {
        self.catalog.view()
    }

    /// Number of pages for the current filter.
    pub fn page_count(&self) -> usize {
        let selection = self.catalog.selection();
        paging::page_count(self.view().total_count, selection.page_size())
    }

    pub fn selected_movie(&self) -> Option<Movie> {
        self.view().page_items.into_iter().nth(self.movie_cursor)
    }

    /// Index of the genre the filter currently uses, for highlighting.
    pub fn active_genre_index(&self) -> Option<usize> {
        let active = self.catalog.selection().filter().selected_genre()?;
        self.catalog.genres().iter().position(|g| g.id == active.id)
    }

    /// Keep both cursors inside their lists.
    pub fn clamp_cursors(&mut self) {
        let genres = self.catalog.genres().len();
        self.genre_cursor = self.genre_cursor.min(genres.saturating_sub(1));
        let rows = self.view().page_items.len();
        self.movie_cursor = self.movie_cursor.min(rows.saturating_sub(1));
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn nav_up(&mut self) {
        match self.focus {
            Focus::Genres => self.genre_cursor = self.genre_cursor.saturating_sub(1),
            Focus::Movies => self.movie_cursor = self.movie_cursor.saturating_sub(1),
        }
    }

    pub fn nav_down(&mut self) {
        let len = match self.focus {
            Focus::Genres => self.catalog.genres().len(),
            Focus::Movies => self.view().page_items.len(),
        };
        let max_index = len.saturating_sub(1);
        let cursor = match self.focus {
            Focus::Genres => &mut self.genre_cursor,
            Focus::Movies => &mut self.movie_cursor,
        };
        *cursor = cursor.saturating_add(1).min(max_index);
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Genres => Focus::Movies,
            Focus::Movies => Focus::Genres,
        };
    }

    /// Filter by the genre under the cursor. Clears the search box.
    pub fn select_genre_at_cursor(&mut self) {
        let Some(genre) = self.catalog.genres().get(self.genre_cursor).cloned() else {
            return;
        };
        tracing::debug!(genre = %genre.name, "Genre selected");
        self.select_genre(genre);
    }

    pub fn select_genre(&mut self, genre: Genre) {
        self.search_input.clear();
        self.catalog.select_genre(genre);
        self.movie_cursor = 0;
    }

    // ========================================================================
    // Search
    // ========================================================================

    pub fn enter_search(&mut self) {
        self.search_mode = true;
    }

    /// Append a typed character and re-run the search.
    pub fn push_search_char(&mut self, c: char) {
        if self.search_input.len() >= MAX_SEARCH_QUERY_LENGTH {
            self.set_status(format!(
                "Search query too long (max {} chars)",
                MAX_SEARCH_QUERY_LENGTH
            ));
            return;
        }
        self.search_input.push(c);
        self.apply_search();
    }

    pub fn pop_search_char(&mut self) {
        if self.search_input.pop().is_some() {
            self.apply_search();
        }
    }

    /// Empty the search box and drop the search filter.
    pub fn clear_search(&mut self) {
        let had_search = !self.catalog.selection().filter().search_query().is_empty();
        self.search_input.clear();
        if had_search {
            self.apply_search();
        }
    }

    fn apply_search(&mut self) {
        self.catalog.search(self.search_input.clone());
        self.movie_cursor = 0;
    }

    // ========================================================================
    // Sorting & paging
    // ========================================================================

    /// Header-click semantics: the active column flips, others sort ascending.
    pub fn sort_by_field(&mut self, field: SortField) {
        let sort = self.catalog.selection().sort().toggled_for(field);
        self.catalog.sort_by(sort);
        self.clamp_cursors();
    }

    pub fn next_page(&mut self) {
        let current = self.catalog.selection().current_page();
        if current < self.page_count() {
            self.catalog.go_to_page(current + 1);
            self.movie_cursor = 0;
        }
    }

    pub fn prev_page(&mut self) {
        let current = self.catalog.selection().current_page();
        if current > 1 {
            self.catalog.go_to_page(current - 1);
            self.movie_cursor = 0;
        }
    }

    /// After a delete empties the last page, step back to the new last page.
    pub fn clamp_page(&mut self) {
        let pages = self.page_count().max(1);
        if self.catalog.selection().current_page() > pages {
            self.catalog.go_to_page(pages);
        }
        self.clamp_cursors();
    }

    // ========================================================================
    // Catalog lifecycle
    // ========================================================================

    pub fn apply_loaded(&mut self, loaded: LoadedCatalog) {
        self.catalog.populate(loaded);
        self.loading = false;
        self.genre_cursor = 0;
        self.movie_cursor = 0;
        self.clamp_cursors();
    }

    /// Flip `liked` on the movie under the cursor.
    pub fn toggle_like_selected(&mut self) -> Option<bool> {
        let movie = self.selected_movie()?;
        self.catalog.toggle_liked(&movie.id)
    }

    /// Remove the movie under the cursor locally. The caller sends the
    /// request and later feeds the answer to [`App::finish_delete`].
    pub fn begin_delete_selected(&mut self) -> Option<PendingDelete> {
        let movie = self.selected_movie()?;
        let pending = self.catalog.begin_delete(&movie.id)?;
        self.deletes_in_flight += 1;
        self.clamp_page();
        Some(pending)
    }

    pub fn finish_delete(&mut self, pending: PendingDelete, result: Result<(), ApiError>) {
        self.deletes_in_flight = self.deletes_in_flight.saturating_sub(1);
        self.catalog
            .finish_delete(pending, result, &mut self.status);
        self.clamp_page();
    }
}

/// Abort the startup fetch if the app goes away first.
impl Drop for App {
    fn drop(&mut self) {
        if let Some(handle) = self.bootstrap_handle.take() {
            handle.abort();
            tracing::debug!("Aborted catalog load task on App drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::time;
    use vidly::catalog::{MovieId, SortColumn, SortOrder};
    use vidly::util::parse_base_url;

    fn test_app() -> App {
        let base = parse_base_url("http://127.0.0.1:9/api").unwrap();
        let api = ApiClient::with_client(reqwest::Client::new(), base);
        App::new(api, SelectionState::new(2))
    }

    fn movie(id: &str, title: &str, genre: &Genre) -> Movie {
        Movie {
            id: MovieId::new(id),
            title: Arc::from(title),
            genre: genre.clone(),
            number_in_stock: 1,
            daily_rental_rate: 1.5,
            liked: false,
        }
    }

    fn loaded_app() -> App {
        let action = Genre::new("g1", "Action");
        let comedy = Genre::new("g2", "Comedy");
        let mut app = test_app();
        app.apply_loaded(LoadedCatalog {
            genres: vec![Genre::all(), action.clone(), comedy.clone()],
            movies: vec![
                movie("1", "Airplane", &comedy),
                movie("2", "Die Hard", &action),
                movie("3", "Terminator", &action),
            ],
        });
        app
    }

    #[tokio::test]
    async fn test_status_info_expires_after_3_seconds() {
        time::pause();
        let mut app = test_app();
        app.set_status("Theme: Light");

        time::advance(Duration::from_millis(2999)).await;
        assert!(!app.clear_expired_status());
        assert!(app.status.current().is_some());

        time::advance(Duration::from_millis(1)).await;
        assert!(app.clear_expired_status());
        assert!(app.status.current().is_none());
    }

    #[tokio::test]
    async fn test_status_error_outlives_info() {
        time::pause();
        let mut status = StatusLine::default();
        status.notify_error("boom".to_string());

        time::advance(Duration::from_secs(4)).await;
        assert!(!status.clear_expired());
        assert_eq!(status.current().map(|m| m.kind), Some(StatusKind::Error));

        time::advance(Duration::from_secs(2)).await;
        assert!(status.clear_expired());
    }

    #[tokio::test]
    async fn test_nav_clamps_to_page() {
        let mut app = loaded_app();
        // Page size 2: first page holds Airplane, Die Hard
        app.nav_down();
        app.nav_down();
        assert_eq!(app.movie_cursor, 1);
        app.nav_up();
        app.nav_up();
        assert_eq!(app.movie_cursor, 0);
    }

    #[tokio::test]
    async fn test_paging_stops_at_bounds() {
        let mut app = loaded_app();
        assert_eq!(app.page_count(), 2);
        app.prev_page();
        assert_eq!(app.catalog.selection().current_page(), 1);
        app.next_page();
        app.next_page();
        assert_eq!(app.catalog.selection().current_page(), 2);
    }

    #[tokio::test]
    async fn test_select_genre_clears_search_box() {
        let mut app = loaded_app();
        app.enter_search();
        app.push_search_char('t');
        assert_eq!(app.view().total_count, 1);

        app.focus = Focus::Genres;
        app.genre_cursor = 1;
        app.select_genre_at_cursor();
        assert!(app.search_input.is_empty());
        assert_eq!(app.view().total_count, 2);
        assert_eq!(app.active_genre_index(), Some(1));
    }

    #[tokio::test]
    async fn test_search_keystrokes_update_filter() {
        let mut app = loaded_app();
        app.genre_cursor = 2;
        app.select_genre_at_cursor();

        app.push_search_char('D');
        app.push_search_char('i');
        assert_eq!(app.catalog.selection().filter().search_query(), "Di");
        assert_eq!(app.active_genre_index(), None, "search clears the genre");

        app.pop_search_char();
        app.pop_search_char();
        assert_eq!(app.view().total_count, 3);
    }

    #[tokio::test]
    async fn test_sort_by_same_field_reverses() {
        let mut app = loaded_app();
        app.sort_by_field(SortField::Title);
        assert_eq!(
            app.catalog.selection().sort(),
            SortColumn::new(SortField::Title, SortOrder::Desc)
        );
        assert_eq!(app.selected_movie().map(|m| m.id), Some(MovieId::new("3")));
    }

    #[tokio::test]
    async fn test_delete_last_item_on_page_steps_back() {
        let mut app = loaded_app();
        app.next_page();
        let pending = app.begin_delete_selected().unwrap();
        assert_eq!(pending.movie_id().as_str(), "3");
        assert_eq!(app.deletes_in_flight, 1);
        assert_eq!(app.catalog.selection().current_page(), 1);

        app.finish_delete(pending, Err(ApiError::HttpStatus(500)));
        assert_eq!(app.deletes_in_flight, 0);
        assert_eq!(app.view().total_count, 3);
        assert_eq!(app.status.current().map(|m| m.kind), Some(StatusKind::Error));
    }

    #[tokio::test]
    async fn test_toggle_like_selected() {
        let mut app = loaded_app();
        assert_eq!(app.toggle_like_selected(), Some(true));
        assert!(app.selected_movie().is_some_and(|m| m.liked));
    }

    #[tokio::test]
    async fn test_cycle_theme_round_trip() {
        let mut app = test_app();
        assert_eq!(app.cycle_theme(), "Light");
        assert_eq!(app.cycle_theme(), "Dark");
        assert_eq!(app.theme_variant, ThemeVariant::Dark);
    }
}
