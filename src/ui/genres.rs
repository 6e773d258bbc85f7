use crate::app::{App, Focus};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use vidly::util::{strip_control_chars, truncate_to_width};

/// Render the genre list panel
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus == Focus::Genres;
    let genres = app.catalog.genres();
    let active = app.active_genre_index();
    // Border (2) + marker (2)
    let max_name_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = if genres.is_empty() {
        let text = if app.loading { "Loading..." } else { "No genres" };
        vec![ListItem::new(text)]
    } else {
        genres
            .iter()
            .enumerate()
            .map(|(i, genre)| {
                let is_active = active == Some(i);
                let style = if is_focused && i == app.genre_cursor {
                    app.style("genre_cursor")
                } else if is_active {
                    app.style("genre_active")
                } else {
                    app.style("genre_normal")
                };

                let name = strip_control_chars(&genre.name);
                let marker = if is_active { "▸ " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, app.style("genre_active")),
                    Span::styled(truncate_to_width(&name, max_name_width).into_owned(), style),
                ]))
            })
            .collect()
    };

    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Genres "),
    );

    f.render_widget(list, area);
}
