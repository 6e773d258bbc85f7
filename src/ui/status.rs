use crate::app::{App, StatusKind};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Number of frames in the busy spinner.
pub(super) const SPINNER_FRAMES: usize = SPINNER.len();

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let mut style = app.style("status_bar");
    let text: Cow<'_, str> = if let Some(msg) = app.status.current() {
        if msg.kind == StatusKind::Error {
            style = app.style("status_error");
        }
        Cow::Borrowed(msg.text.as_ref())
    } else if app.loading {
        Cow::Owned(format!("{} Loading catalog...", spinner(app)))
    } else if app.deletes_in_flight > 0 {
        Cow::Owned(format!(
            "{} Deleting ({} pending)...",
            spinner(app),
            app.deletes_in_flight
        ))
    } else if app.search_mode {
        Cow::Borrowed("Type to search | ESC cancel | ENTER confirm")
    } else {
        Cow::Borrowed("[/]search [1-4]sort [l]ike [d]elete [n/p]page [Tab]switch [?]help [q]uit")
    };

    f.render_widget(Paragraph::new(text).style(style), area);
}

fn spinner(app: &App) -> &'static str {
    SPINNER[app.spinner_frame % SPINNER_FRAMES]
}
