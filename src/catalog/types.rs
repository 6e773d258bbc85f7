use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque movie identity as issued by the catalog API (`_id`).
///
/// `Arc<str>` keeps clones cheap: ids travel into spawned delete tasks and
/// back through `AppEvent`s.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(Arc<str>);

impl MovieId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Genre identity. The empty id is reserved for the synthetic "All Genres" entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreId(Arc<str>);

impl GenreId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GenreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GenreId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A genre as listed by the catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(rename = "_id")]
    pub id: GenreId,
    pub name: Arc<str>,
}

impl Genre {
    /// Display name of the synthetic "no filter" entry.
    pub const ALL_GENRES: &'static str = "All Genres";

    pub fn new(id: impl AsRef<str>, name: impl AsRef<str>) -> Self {
        Self {
            id: GenreId::new(id),
            name: Arc::from(name.as_ref()),
        }
    }

    /// The synthetic entry prepended to the loaded genre list.
    pub fn all() -> Self {
        Self::new("", Self::ALL_GENRES)
    }

    /// True for the synthetic entry (empty id), which filters nothing.
    pub fn is_all(&self) -> bool {
        self.id.is_empty()
    }
}

/// A movie as listed by the catalog API.
///
/// `liked` is client-side state; the API may omit it, in which case it
/// starts out `false`. `number_in_stock` and `daily_rental_rate` are display
/// and sort columns only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: MovieId,
    pub title: Arc<str>,
    pub genre: Genre,
    #[serde(default)]
    pub number_in_stock: u32,
    #[serde(default)]
    pub daily_rental_rate: f64,
    #[serde(default)]
    pub liked: bool,
}

// ============================================================================
// Sorting
// ============================================================================

/// Sortable movie table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Title,
    Genre,
    Stock,
    Rate,
}

impl SortField {
    pub const ALL: [SortField; 4] = [Self::Title, Self::Genre, Self::Stock, Self::Rate];

    /// Field path within the movie JSON document.
    pub fn path(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Genre => "genre.name",
            Self::Stock => "numberInStock",
            Self::Rate => "dailyRentalRate",
        }
    }

    /// Parse a field path (as written in config) back into a column.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.path() == path.trim())
    }

    /// Column header label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Genre => "Genre",
            Self::Stock => "Stock",
            Self::Rate => "Rate",
        }
    }

    /// Compare two movies on this field in ascending order.
    pub(crate) fn compare(self, a: &Movie, b: &Movie) -> Ordering {
        match self {
            Self::Title => a.title.cmp(&b.title),
            Self::Genre => a.genre.name.cmp(&b.genre.name),
            Self::Stock => a.number_in_stock.cmp(&b.number_in_stock),
            Self::Rate => a.daily_rental_rate.total_cmp(&b.daily_rental_rate),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Header indicator shown next to the active column.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// Active sort: one column and a direction. Defaults to title ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortColumn {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortColumn {
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Column header click semantics: the active column flips its order,
    /// any other column becomes active in ascending order.
    #[must_use]
    pub fn toggled_for(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.order.flipped())
        } else {
            Self::new(field, SortOrder::Asc)
        }
    }

    /// Compare two movies according to field and direction.
    ///
    /// Descending reverses the comparator, so equal keys still compare equal
    /// and a stable sort keeps their relative order.
    pub(crate) fn compare(self, a: &Movie, b: &Movie) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl Default for SortColumn {
    fn default() -> Self {
        Self::new(SortField::Title, SortOrder::Asc)
    }
}

// ============================================================================
// View Result
// ============================================================================

/// The slice of movies to display plus the number matching the active filter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewResult {
    /// Movies matching the filter, before pagination.
    pub total_count: usize,
    /// Movies on the current page, in sort order.
    pub page_items: Vec<Movie>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_deserializes_api_shape() {
        let json = r#"{
            "_id": "5b21ca3eeb7f6fbccd471815",
            "title": "Terminator",
            "genre": { "_id": "5b21ca3eeb7f6fbccd471818", "name": "Action" },
            "numberInStock": 6,
            "dailyRentalRate": 2.5,
            "publishDate": "2018-01-03T19:04:28.809Z"
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id.as_str(), "5b21ca3eeb7f6fbccd471815");
        assert_eq!(&*movie.title, "Terminator");
        assert_eq!(&*movie.genre.name, "Action");
        assert_eq!(movie.number_in_stock, 6);
        assert_eq!(movie.daily_rental_rate, 2.5);
        assert!(!movie.liked, "liked defaults to false when absent");
    }

    #[test]
    fn test_all_genres_entry() {
        let all = Genre::all();
        assert!(all.is_all());
        assert_eq!(&*all.name, "All Genres");
        assert!(!Genre::new("g1", "Action").is_all());
    }

    #[test]
    fn test_sort_field_paths_round_trip() {
        for field in SortField::ALL {
            assert_eq!(SortField::from_path(field.path()), Some(field));
        }
        assert_eq!(SortField::from_path("liked"), None);
    }

    #[test]
    fn test_toggled_for_same_field_flips_order() {
        let sort = SortColumn::default();
        let toggled = sort.toggled_for(SortField::Title);
        assert_eq!(toggled, SortColumn::new(SortField::Title, SortOrder::Desc));
        assert_eq!(toggled.toggled_for(SortField::Title), sort);
    }

    #[test]
    fn test_toggled_for_other_field_resets_to_ascending() {
        let sort = SortColumn::new(SortField::Title, SortOrder::Desc);
        assert_eq!(
            sort.toggled_for(SortField::Rate),
            SortColumn::new(SortField::Rate, SortOrder::Asc)
        );
    }
}
