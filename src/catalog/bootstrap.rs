//! Initial catalog load.

use super::selection::SelectionState;
use super::state::Catalog;
use super::types::{Genre, Movie};
use crate::api::{ApiClient, ApiError};

/// Collections as fetched at startup, genres already prefixed with
/// "All Genres".
#[derive(Debug, Clone, Default)]
pub struct LoadedCatalog {
    pub genres: Vec<Genre>,
    pub movies: Vec<Movie>,
}

/// Fetch genres and movies concurrently.
///
/// Either failure fails the whole load; there are no retries.
pub async fn fetch(api: &ApiClient) -> Result<LoadedCatalog, ApiError> {
    let (listed_genres, movies) = tokio::try_join!(api.list_genres(), api.list_movies())?;

    let mut genres = Vec::with_capacity(listed_genres.len() + 1);
    genres.push(Genre::all());
    genres.extend(listed_genres);

    Ok(LoadedCatalog { genres, movies })
}

/// Fetch everything and return a populated catalog with default selection.
pub async fn load(api: &ApiClient) -> Result<Catalog, ApiError> {
    let loaded = fetch(api).await?;
    let mut catalog = Catalog::new(SelectionState::default());
    catalog.populate(loaded);
    Ok(catalog)
}
