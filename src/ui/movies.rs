//! Movie table: search box, summary line, sortable table and pagination.

use crate::app::{App, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use vidly::catalog::{paging, Movie, SortColumn, SortField};
use vidly::util::{strip_control_chars, truncate_to_width};

const LIKED: &str = "♥";
const NOT_LIKED: &str = "♡";

/// Render the right-hand panel: search box on top, then the table.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_search_box(f, app, chunks[0]);
    render_table_panel(f, app, chunks[1]);
}

fn render_search_box(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.search_mode {
        (format!("{}_", app.search_input), app.style("search_box_active"))
    } else if app.search_input.is_empty() {
        ("Search... (/)".to_string(), app.style("search_box"))
    } else {
        (app.search_input.clone(), app.style("search_box"))
    };

    let border_style = if app.search_mode {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Search "),
    );
    f.render_widget(input, area);
}

fn render_table_panel(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus == Focus::Movies && !app.search_mode;
    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Movies ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 1 || inner.height < 1 {
        return;
    }

    let view = app.view();
    let selection = app.catalog.selection();
    let pages = paging::page_numbers(view.total_count, selection.page_size());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(if pages.is_empty() { 0 } else { 1 }),
        ])
        .split(inner);

    let summary = if app.loading {
        "Loading catalog...".to_string()
    } else if app.catalog.movies().is_empty() {
        "There are no movies in the database.".to_string()
    } else {
        format!("Showing {} movies in the database.", view.total_count)
    };
    f.render_widget(
        Paragraph::new(summary).style(app.style("summary")),
        chunks[0],
    );

    render_table(f, app, &view.page_items, selection.sort(), chunks[1]);

    if !pages.is_empty() {
        render_pagination(f, app, &pages, selection.current_page(), chunks[2]);
    }
}

fn render_table(f: &mut Frame, app: &App, movies: &[Movie], sort: SortColumn, area: Rect) {
    // Fixed columns: genre 12, stock 6, rate 6, like 2, plus spacing
    let title_width = area.width.saturating_sub(12 + 6 + 6 + 2 + 4).max(8) as usize;

    let header = Row::new(SortField::ALL.iter().map(|&field| {
        if field == sort.field {
            Cell::from(format!("{} {}", field.label(), sort.order.indicator()))
                .style(app.style("column_header_sorted"))
        } else {
            Cell::from(field.label()).style(app.style("column_header"))
        }
    }))
    .bottom_margin(0);

    let show_cursor = app.focus == Focus::Movies && !app.search_mode;
    let rows = movies.iter().enumerate().map(|(i, movie)| {
        let row_style = if show_cursor && i == app.movie_cursor {
            app.style("movie_cursor")
        } else {
            app.style("movie_row")
        };

        let title = strip_control_chars(&movie.title);
        let genre = strip_control_chars(&movie.genre.name);
        let like = if movie.liked {
            Span::styled(LIKED, app.style("like_marker"))
        } else {
            Span::styled(NOT_LIKED, app.style("unlike_marker"))
        };

        Row::new(vec![
            Cell::from(truncate_to_width(&title, title_width).into_owned()),
            Cell::from(truncate_to_width(&genre, 12).into_owned()),
            Cell::from(movie.number_in_stock.to_string()),
            Cell::from(movie.daily_rental_rate.to_string()),
            Cell::from(Line::from(like)),
        ])
        .style(row_style)
    });

    let widths = [
        Constraint::Min(8),
        Constraint::Length(12),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(2),
    ];

    let table = Table::new(rows, widths).header(header).column_spacing(1);
    f.render_widget(table, area);
}

fn render_pagination(f: &mut Frame, app: &App, pages: &[usize], current: usize, area: Rect) {
    let mut spans = vec![Span::styled("Pages: ", app.style("page_number"))];
    for &page in pages {
        let style = if page == current {
            app.style("page_current")
        } else {
            app.style("page_number")
        };
        spans.push(Span::styled(format!(" {} ", page), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
