//! Background task event processing.

use crate::app::{App, AppEvent};

/// Apply a background task result to the app state.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::CatalogLoaded(loaded) => {
            app.bootstrap_handle = None;
            let movies = loaded.movies.len();
            app.apply_loaded(loaded);
            app.set_status(format!("Loaded {} movies", movies));
        }
        AppEvent::CatalogLoadFailed(e) => {
            app.bootstrap_handle = None;
            app.loading = false;
            tracing::error!(error = %e, "Catalog load failed");
            app.status.error(format!("Failed to load catalog: {}", e));
        }
        AppEvent::DeleteFinished { pending, result } => {
            let title = pending.movie().title.clone();
            let ok = result.is_ok();
            app.finish_delete(pending, result);
            if ok {
                tracing::info!(title = %title, "Movie deleted");
            }
        }
    }
}
