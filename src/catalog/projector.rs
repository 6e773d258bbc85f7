//! Derived view: filter, stable sort, paginate.
//!
//! Recomputed on every read. The projector borrows the collection and never
//! mutates it; page items are cheap clones (`Arc<str>` fields).

use super::paging::paginate;
use super::selection::{FilterMode, SelectionState};
use super::types::{Movie, ViewResult};

/// Compute the page of movies to display for `selection`.
pub fn project(movies: &[Movie], selection: &SelectionState) -> ViewResult {
    let mut filtered = filter_movies(movies, selection.filter());
    let total_count = filtered.len();

    // `sort_by` is stable: ties keep their filtered (collection) order.
    let sort = selection.sort();
    filtered.sort_by(|a, b| sort.compare(a, b));

    let page_items = paginate(&filtered, selection.current_page(), selection.page_size())
        .iter()
        .map(|movie| (*movie).clone())
        .collect();

    ViewResult {
        total_count,
        page_items,
    }
}

/// Apply the filter mode, preserving collection order.
///
/// Search text is checked first and the genre second, so a malformed state
/// carrying both would still search.
pub fn filter_movies<'a>(movies: &'a [Movie], filter: &FilterMode) -> Vec<&'a Movie> {
    let query = filter.search_query();
    if !query.is_empty() {
        let prefix = query.to_lowercase();
        return movies
            .iter()
            .filter(|movie| movie.title.to_lowercase().starts_with(&prefix))
            .collect();
    }

    match filter.selected_genre() {
        Some(genre) if !genre.is_all() => movies
            .iter()
            .filter(|movie| movie.genre.id == genre.id)
            .collect(),
        _ => movies.iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::{Genre, MovieId, SortColumn, SortField, SortOrder};
    use std::sync::Arc;

    fn movie(id: &str, title: &str, genre: (&str, &str), stock: u32, rate: f64) -> Movie {
        Movie {
            id: MovieId::new(id),
            title: Arc::from(title),
            genre: Genre::new(genre.0, genre.1),
            number_in_stock: stock,
            daily_rental_rate: rate,
            liked: false,
        }
    }

    fn catalog() -> Vec<Movie> {
        vec![
            movie("1", "Terminator", ("g1", "Action"), 6, 2.5),
            movie("2", "Die Hard", ("g1", "Action"), 5, 2.5),
            movie("3", "Get Out", ("g3", "Thriller"), 8, 3.5),
            movie("4", "Trip to Italy", ("g2", "Comedy"), 7, 3.5),
            movie("5", "Airplane", ("g2", "Comedy"), 7, 3.5),
            movie("6", "Wedding Crashers", ("g2", "Comedy"), 7, 3.5),
            movie("7", "Gone Girl", ("g3", "Thriller"), 7, 4.5),
            movie("8", "The Sixth Sense", ("g3", "Thriller"), 4, 3.5),
            movie("9", "The Avengers", ("g1", "Action"), 7, 3.5),
        ]
    }

    fn ids(view: &ViewResult) -> Vec<&str> {
        view.page_items.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_no_filter_sorted_by_title() {
        let state = SelectionState::new(20);
        let view = project(&catalog(), &state);
        assert_eq!(view.total_count, 9);
        let titles: Vec<&str> = view.page_items.iter().map(|m| &*m.title).collect();
        assert_eq!(
            titles,
            [
                "Airplane",
                "Die Hard",
                "Get Out",
                "Gone Girl",
                "Terminator",
                "The Avengers",
                "The Sixth Sense",
                "Trip to Italy",
                "Wedding Crashers"
            ]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_prefix() {
        let movies = catalog();
        for query in ["term", "TERM", "Terminator"] {
            let view = project(&movies, &SelectionState::default().search(query));
            assert_eq!(ids(&view), ["1"], "query {query:?}");
        }
        let view = project(&movies, &SelectionState::default().search("inat"));
        assert_eq!(view.total_count, 0);
        assert!(view.page_items.is_empty());
    }

    #[test]
    fn test_genre_filter() {
        let state = SelectionState::new(10).select_genre(Genre::new("g3", "Thriller"));
        let view = project(&catalog(), &state);
        assert_eq!(view.total_count, 3);
        assert_eq!(ids(&view), ["3", "7", "8"]);
    }

    #[test]
    fn test_all_genres_entry_filters_nothing() {
        let state = SelectionState::new(10).select_genre(Genre::all());
        assert_eq!(project(&catalog(), &state).total_count, 9);
    }

    #[test]
    fn test_descending_sort_keeps_ties_stable() {
        // Rates: 3.5 appears for ids 3,4,5,6,8,9 in collection order.
        let state = SelectionState::new(20).sort_by(SortColumn::new(SortField::Rate, SortOrder::Desc));
        let view = project(&catalog(), &state);
        assert_eq!(ids(&view), ["7", "3", "4", "5", "6", "8", "9", "1", "2"]);
    }

    #[test]
    fn test_sort_by_genre_name_is_stable() {
        let state = SelectionState::new(20).sort_by(SortColumn::new(SortField::Genre, SortOrder::Asc));
        let view = project(&catalog(), &state);
        assert_eq!(ids(&view), ["1", "2", "9", "4", "5", "6", "3", "7", "8"]);
    }

    #[test]
    fn test_page_past_end_is_empty_but_counts() {
        let state = SelectionState::new(4).go_to_page(4);
        let view = project(&catalog(), &state);
        assert_eq!(view.total_count, 9);
        assert!(view.page_items.is_empty());
    }

    #[test]
    fn test_empty_collection() {
        let view = project(&[], &SelectionState::default().search("a"));
        assert_eq!(view, ViewResult::default());
    }
}
