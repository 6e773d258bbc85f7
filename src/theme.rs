//! Theme system for the TUI.
//!
//! Semantic color roles map to ratatui `Style` values. `ThemeVariant`
//! selects a palette and `StyleMap` resolves role names to styles at render
//! time.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// Every semantic UI role and its style.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Genre list --
    pub genre_normal: Style,
    /// Genre currently applied as the filter
    pub genre_active: Style,
    pub genre_cursor: Style,

    // -- Movie table --
    pub movie_row: Style,
    pub movie_cursor: Style,
    pub like_marker: Style,
    pub unlike_marker: Style,
    pub column_header: Style,
    pub column_header_sorted: Style,
    pub summary: Style,

    // -- Search & pagination --
    pub search_box: Style,
    pub search_box_active: Style,
    pub page_number: Style,
    pub page_current: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub status_error: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        let cursor = Style::default().bg(Color::DarkGray).fg(Color::White);
        Self {
            genre_normal: Style::default(),
            genre_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            genre_cursor: cursor,

            movie_row: Style::default(),
            movie_cursor: cursor,
            like_marker: Style::default().fg(Color::Red),
            unlike_marker: Style::default().fg(Color::DarkGray),
            column_header: Style::default().add_modifier(Modifier::BOLD),
            column_header_sorted: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            summary: Style::default().fg(Color::Gray),

            search_box: Style::default().fg(Color::Gray),
            search_box_active: Style::default().fg(Color::Yellow),
            page_number: Style::default().fg(Color::Gray),
            page_current: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            status_error: Style::default()
                .bg(Color::Red)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
        }
    }

    /// Adapted for light terminal backgrounds.
    fn light() -> Self {
        let cursor = Style::default().bg(Color::Blue).fg(Color::White);
        Self {
            genre_normal: Style::default().fg(Color::Black),
            genre_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            genre_cursor: cursor,

            movie_row: Style::default().fg(Color::Black),
            movie_cursor: cursor,
            like_marker: Style::default().fg(Color::Magenta),
            unlike_marker: Style::default().fg(Color::DarkGray),
            column_header: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            column_header_sorted: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            summary: Style::default().fg(Color::DarkGray),

            search_box: Style::default().fg(Color::DarkGray),
            search_box_active: Style::default().fg(Color::Magenta),
            page_number: Style::default().fg(Color::DarkGray),
            page_current: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            status_error: Style::default()
                .bg(Color::Red)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
        }
    }

    /// (role name, style) for every role, in declaration order.
    fn roles(&self) -> [(&'static str, Style); 18] {
        [
            ("genre_normal", self.genre_normal),
            ("genre_active", self.genre_active),
            ("genre_cursor", self.genre_cursor),
            ("movie_row", self.movie_row),
            ("movie_cursor", self.movie_cursor),
            ("like_marker", self.like_marker),
            ("unlike_marker", self.unlike_marker),
            ("column_header", self.column_header),
            ("column_header_sorted", self.column_header_sorted),
            ("summary", self.summary),
            ("search_box", self.search_box),
            ("search_box_active", self.search_box_active),
            ("page_number", self.page_number),
            ("page_current", self.page_current),
            ("status_bar", self.status_bar),
            ("status_error", self.status_error),
            ("panel_border", self.panel_border),
            ("panel_border_focused", self.panel_border_focused),
        ]
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// Role-name keyed style lookup, built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

impl StyleMap {
    pub fn from_palette(palette: &ColorPalette) -> Self {
        Self {
            map: palette.roles().into_iter().collect(),
        }
    }

    /// Resolve a role name. Unknown roles get `Style::default()`.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_from_str_name() {
        assert_eq!(ThemeVariant::from_str_name("dark"), Some(ThemeVariant::Dark));
        assert_eq!(ThemeVariant::from_str_name(" Light "), Some(ThemeVariant::Light));
        assert_eq!(ThemeVariant::from_str_name("neon"), None);
    }

    #[test]
    fn variant_cycles() {
        assert_eq!(ThemeVariant::Dark.next(), ThemeVariant::Light);
        assert_eq!(ThemeVariant::Dark.next().next(), ThemeVariant::Dark);
    }

    #[test]
    fn light_palette_differs_from_dark() {
        let dark = ThemeVariant::Dark.palette();
        let light = ThemeVariant::Light.palette();
        assert_ne!(dark.movie_cursor, light.movie_cursor);
        assert_ne!(dark.status_bar, light.status_bar);
    }

    #[test]
    fn style_map_resolves_every_role() {
        let palette = ThemeVariant::Dark.palette();
        let styles = StyleMap::from_palette(&palette);
        for (name, style) in palette.roles() {
            assert_eq!(styles.resolve(name), style, "role {name}");
        }
        assert_eq!(styles.map.len(), palette.roles().len(), "role names are unique");
    }

    #[test]
    fn style_map_returns_default_for_unknown() {
        let styles = StyleMap::from_palette(&ThemeVariant::Light.palette());
        assert_eq!(styles.resolve("nonexistent_role"), Style::default());
    }
}
