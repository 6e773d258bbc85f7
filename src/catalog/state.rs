use super::bootstrap::LoadedCatalog;
use super::projector::project;
use super::selection::SelectionState;
use super::types::{Genre, Movie, MovieId, SortColumn, ViewResult};
use crate::api::{ApiClient, ApiError};
use std::sync::Arc;

/// Sink for user-facing error messages raised by catalog mutations.
///
/// The TUI status line implements this; tests use a recording notifier.
pub trait Notifier {
    fn notify_error(&mut self, message: String);
}

/// Outcome of a completed optimistic delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The server confirmed the delete; the removal stands.
    Deleted,
    /// The server call failed; the movie is back in the collection.
    RolledBack,
}

/// An optimistic delete waiting for the server's answer.
///
/// Returned by [`Catalog::begin_delete`] after the movie has been removed
/// locally; hand it back to [`Catalog::finish_delete`] with the result.
#[derive(Debug, Clone)]
pub struct PendingDelete {
    movie: Movie,
    index: usize,
    snapshot: Arc<Vec<Movie>>,
    after_removal: Arc<Vec<Movie>>,
}

impl PendingDelete {
    pub fn movie(&self) -> &Movie {
        &self.movie
    }

    pub fn movie_id(&self) -> &MovieId {
        &self.movie.id
    }
}

/// Movie collection, genre list and view selection.
///
/// The collections are loaded once and afterwards only changed in memory.
/// Every mutation installs a new `Arc<Vec<_>>`, so clones handed out by
/// [`Catalog::movies`] stay consistent snapshots. All mutation happens on
/// the event loop; spawned tasks only ever read.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Arc<Vec<Movie>>,
    genres: Arc<Vec<Genre>>,
    selection: SelectionState,
}

impl Catalog {
    pub fn new(selection: SelectionState) -> Self {
        Self {
            movies: Arc::new(Vec::new()),
            genres: Arc::new(Vec::new()),
            selection,
        }
    }

    /// Install freshly loaded collections. The selection is kept.
    pub fn populate(&mut self, loaded: LoadedCatalog) {
        tracing::info!(
            movies = loaded.movies.len(),
            genres = loaded.genres.len(),
            "Catalog loaded"
        );
        self.movies = Arc::new(loaded.movies);
        self.genres = Arc::new(loaded.genres);
    }

    pub fn movies(&self) -> &Arc<Vec<Movie>> {
        &self.movies
    }

    /// Genre list, "All Genres" first once loaded.
    pub fn genres(&self) -> &Arc<Vec<Genre>> {
        &self.genres
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn movie(&self, id: &MovieId) -> Option<&Movie> {
        self.movies.iter().find(|m| &m.id == id)
    }

    /// Current page of the derived view.
    pub fn view(&self) -> ViewResult {
        project(&self.movies, &self.selection)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn select_genre(&mut self, genre: Genre) {
        self.selection = self.selection.select_genre(genre);
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.selection = self.selection.search(query);
    }

    pub fn sort_by(&mut self, sort: SortColumn) {
        self.selection = self.selection.sort_by(sort);
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.selection = self.selection.go_to_page(page);
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Flip a movie's `liked` flag locally.
    ///
    /// Returns the new value, or `None` when the id is unknown (no-op).
    pub fn toggle_liked(&mut self, id: &MovieId) -> Option<bool> {
        let index = self.movies.iter().position(|m| &m.id == id)?;
        let mut movies = Vec::clone(&self.movies);
        let movie = &mut movies[index];
        movie.liked = !movie.liked;
        let liked = movie.liked;
        self.movies = Arc::new(movies);
        Some(liked)
    }

    /// Remove a movie optimistically and remember how to undo it.
    ///
    /// Returns `None` when the id is not in the collection; nothing changes
    /// and no request should be sent.
    pub fn begin_delete(&mut self, id: &MovieId) -> Option<PendingDelete> {
        let index = self.movies.iter().position(|m| &m.id == id)?;
        let snapshot = Arc::clone(&self.movies);

        let mut remaining = Vec::with_capacity(snapshot.len().saturating_sub(1));
        remaining.extend(snapshot[..index].iter().cloned());
        remaining.extend(snapshot[index + 1..].iter().cloned());
        let after_removal = Arc::new(remaining);

        self.movies = Arc::clone(&after_removal);
        tracing::debug!(movie_id = %id, index, "Movie removed optimistically");

        Some(PendingDelete {
            movie: snapshot[index].clone(),
            index,
            snapshot,
            after_removal,
        })
    }

    /// Settle an optimistic delete with the server's answer.
    ///
    /// On failure the movie is restored and exactly one message goes to
    /// `notifier`. If nothing else touched the collection since
    /// [`Catalog::begin_delete`], the pre-delete snapshot is reinstated as-is;
    /// otherwise the movie is re-inserted at its old position, keeping the
    /// newer changes.
    pub fn finish_delete(
        &mut self,
        pending: PendingDelete,
        result: Result<(), ApiError>,
        notifier: &mut impl Notifier,
    ) -> DeleteOutcome {
        let err = match result {
            Ok(()) => {
                tracing::info!(movie_id = %pending.movie.id, "Movie deleted");
                return DeleteOutcome::Deleted;
            }
            Err(err) => err,
        };

        tracing::warn!(
            movie_id = %pending.movie.id,
            error = %err,
            "Delete failed, rolling back"
        );

        let message = if err.is_not_found() {
            "This movie has already been deleted.".to_string()
        } else {
            format!("Could not delete \"{}\": {}", pending.movie.title, err)
        };

        if Arc::ptr_eq(&self.movies, &pending.after_removal) {
            self.movies = pending.snapshot;
        } else if !self.movies.iter().any(|m| m.id == pending.movie.id) {
            let mut movies = Vec::clone(&self.movies);
            let index = pending.index.min(movies.len());
            movies.insert(index, pending.movie);
            self.movies = Arc::new(movies);
        }

        notifier.notify_error(message);
        DeleteOutcome::RolledBack
    }

    /// Full optimistic delete in one call: remove, ask the server, roll back
    /// on failure.
    ///
    /// Returns `None` for an unknown id without contacting the server. The
    /// TUI uses the split form so input keeps flowing during the request.
    pub async fn delete_movie(
        &mut self,
        api: &ApiClient,
        id: &MovieId,
        notifier: &mut impl Notifier,
    ) -> Option<DeleteOutcome> {
        let pending = self.begin_delete(id)?;
        let result = api.delete_movie(id).await;
        Some(self.finish_delete(pending, result, notifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Notifier for Recorder {
        fn notify_error(&mut self, message: String) {
            self.0.push(message);
        }
    }

    fn movie(id: &str, title: &str) -> Movie {
        Movie {
            id: MovieId::new(id),
            title: Arc::from(title),
            genre: Genre::new("g1", "Action"),
            number_in_stock: 3,
            daily_rental_rate: 2.0,
            liked: false,
        }
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new(SelectionState::default());
        catalog.populate(LoadedCatalog {
            genres: vec![Genre::all(), Genre::new("g1", "Action")],
            movies: vec![movie("a", "Alien"), movie("b", "Blade"), movie("c", "Cube")],
        });
        catalog
    }

    fn ids(catalog: &Catalog) -> Vec<&str> {
        catalog.movies().iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_toggle_liked_flips_only_target() {
        let mut catalog = catalog();
        let before = Arc::clone(catalog.movies());

        assert_eq!(catalog.toggle_liked(&MovieId::new("b")), Some(true));
        assert_eq!(ids(&catalog), ["a", "b", "c"]);
        assert!(catalog.movies()[1].liked);
        assert!(!catalog.movies()[0].liked && !catalog.movies()[2].liked);
        // Old snapshot untouched
        assert!(!before[1].liked);

        assert_eq!(catalog.toggle_liked(&MovieId::new("b")), Some(false));
    }

    #[test]
    fn test_toggle_unknown_is_noop() {
        let mut catalog = catalog();
        let before = Arc::clone(catalog.movies());
        assert_eq!(catalog.toggle_liked(&MovieId::new("zzz")), None);
        assert!(Arc::ptr_eq(&before, catalog.movies()));
    }

    #[test]
    fn test_begin_delete_removes_immediately() {
        let mut catalog = catalog();
        let pending = catalog.begin_delete(&MovieId::new("b")).unwrap();
        assert_eq!(pending.movie_id().as_str(), "b");
        assert_eq!(ids(&catalog), ["a", "c"]);
        assert_eq!(catalog.view().total_count, 2);
    }

    #[test]
    fn test_begin_delete_unknown_returns_none() {
        let mut catalog = catalog();
        assert!(catalog.begin_delete(&MovieId::new("zzz")).is_none());
        assert_eq!(ids(&catalog), ["a", "b", "c"]);
    }

    #[test]
    fn test_finish_delete_success_keeps_removal() {
        let mut catalog = catalog();
        let mut notes = Recorder::default();
        let pending = catalog.begin_delete(&MovieId::new("a")).unwrap();

        let outcome = catalog.finish_delete(pending, Ok(()), &mut notes);
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(ids(&catalog), ["b", "c"]);
        assert!(notes.0.is_empty());
    }

    #[test]
    fn test_finish_delete_failure_restores_snapshot() {
        let mut catalog = catalog();
        let original = Arc::clone(catalog.movies());
        let mut notes = Recorder::default();
        let pending = catalog.begin_delete(&MovieId::new("b")).unwrap();

        let outcome = catalog.finish_delete(pending, Err(ApiError::HttpStatus(500)), &mut notes);
        assert_eq!(outcome, DeleteOutcome::RolledBack);
        assert!(Arc::ptr_eq(&original, catalog.movies()));
        assert_eq!(notes.0.len(), 1);
        assert!(notes.0[0].contains("Blade"), "message names the movie: {}", notes.0[0]);
    }

    #[test]
    fn test_finish_delete_not_found_still_rolls_back() {
        let mut catalog = catalog();
        let mut notes = Recorder::default();
        let pending = catalog.begin_delete(&MovieId::new("c")).unwrap();

        let outcome = catalog.finish_delete(pending, Err(ApiError::HttpStatus(404)), &mut notes);
        assert_eq!(outcome, DeleteOutcome::RolledBack);
        assert_eq!(ids(&catalog), ["a", "b", "c"]);
        assert_eq!(notes.0, ["This movie has already been deleted."]);
    }

    #[test]
    fn test_rollback_preserves_later_changes() {
        let mut catalog = catalog();
        let mut notes = Recorder::default();
        let pending_b = catalog.begin_delete(&MovieId::new("b")).unwrap();

        // Other mutations land while the request is in flight
        catalog.toggle_liked(&MovieId::new("a"));
        let pending_c = catalog.begin_delete(&MovieId::new("c")).unwrap();
        catalog.finish_delete(pending_c, Ok(()), &mut notes);

        catalog.finish_delete(pending_b, Err(ApiError::Timeout), &mut notes);
        assert_eq!(ids(&catalog), ["a", "b"]);
        assert!(catalog.movies()[0].liked, "like on 'a' survives the rollback");
        assert_eq!(notes.0.len(), 1);
    }

    #[test]
    fn test_selection_mutators() {
        let mut catalog = catalog();
        catalog.go_to_page(2);
        catalog.search("cu");
        assert_eq!(catalog.selection().current_page(), 1);
        let view = catalog.view();
        assert_eq!(view.total_count, 1);
        assert_eq!(&*view.page_items[0].title, "Cube");
    }
}
