//! Background task spawning shared by the input and loop layers.

use crate::app::{App, AppEvent};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;
use vidly::api::ApiError;
use vidly::catalog::{bootstrap, PendingDelete};

/// Wraps a future to catch panics and convert them to errors.
///
/// Spawned tasks that panic would otherwise vanish inside the runtime. Here
/// the panic payload becomes `Err(String)` so the caller can report it and
/// undo whatever the task was responsible for.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

/// Send an event, logging if the UI loop has already gone away.
async fn send_event(tx: &mpsc::Sender<AppEvent>, event: AppEvent, name: &'static str) {
    if let Err(e) = tx.send(event).await {
        tracing::warn!(error = %e, event = name, "Channel send failed (receiver dropped)");
    }
}

/// Fetch genres and movies in the background.
///
/// Marks the app as loading; the result arrives as `CatalogLoaded` or
/// `CatalogLoadFailed`.
pub(crate) fn spawn_bootstrap(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    if let Some(handle) = app.bootstrap_handle.take() {
        handle.abort();
        tracing::debug!("Aborted previous catalog load task");
    }

    app.loading = true;
    let api = app.api.clone();
    let tx = event_tx.clone();

    tracing::info!(base_url = %api.base_url(), "Loading catalog");

    app.bootstrap_handle = Some(tokio::spawn(async move {
        match catch_task_panic(bootstrap::fetch(&api)).await {
            Ok(Ok(loaded)) => {
                send_event(&tx, AppEvent::CatalogLoaded(loaded), "CatalogLoaded").await;
            }
            Ok(Err(e)) => {
                send_event(&tx, AppEvent::CatalogLoadFailed(e), "CatalogLoadFailed").await;
            }
            Err(panic_msg) => {
                tracing::error!(error = %panic_msg, "Catalog load task panicked");
                send_event(
                    &tx,
                    AppEvent::CatalogLoadFailed(ApiError::Aborted(panic_msg)),
                    "CatalogLoadFailed",
                )
                .await;
            }
        }
    }));
}

/// Send the delete request for an already-removed movie.
///
/// Every path ends in exactly one `DeleteFinished`, so the local removal is
/// either confirmed or rolled back.
pub(super) fn spawn_delete(
    app: &App,
    pending: PendingDelete,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    let api = app.api.clone();
    let tx = event_tx.clone();
    let id = pending.movie_id().clone();

    tracing::debug!(movie_id = %id, "Spawning delete request");

    tokio::spawn(async move {
        let result = match catch_task_panic(api.delete_movie(&id)).await {
            Ok(result) => result,
            Err(panic_msg) => {
                tracing::error!(error = %panic_msg, movie_id = %id, "Delete task panicked");
                Err(ApiError::Aborted(panic_msg))
            }
        };
        send_event(&tx, AppEvent::DeleteFinished { pending, result }, "DeleteFinished").await;
    });
}
