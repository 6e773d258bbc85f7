//! Input handling for the TUI.
//!
//! Keys are resolved to actions through the keybinding registry, using the
//! focused panel (or the search box) as the dispatch context.

use crate::app::{App, AppEvent, Focus};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;
use vidly::catalog::SortField;

use super::helpers::spawn_delete;
use super::Action;

fn focus_to_context(focus: Focus) -> KbContext {
    match focus {
        Focus::Genres => KbContext::GenreList,
        Focus::Movies => KbContext::MovieTable,
    }
}

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    // Help overlay captures all keys while visible
    if app.show_help {
        return handle_help_input(app, code);
    }

    if app.search_mode {
        return handle_search_input(app, code, modifiers);
    }

    handle_browse_input(app, code, modifiers, event_tx)
}

/// j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

/// Typing edits the query live; bound keys (Esc, Enter, arrows) still act.
fn handle_search_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match code {
        KeyCode::Backspace => {
            app.pop_search_char();
            return Action::Continue;
        }
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            app.push_search_char(c);
            return Action::Continue;
        }
        _ => {}
    }

    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Search)
    {
        Some(KbAction::ExitSearch) => {
            app.search_mode = false;
            app.clear_search();
        }
        Some(KbAction::CommitSearch) => {
            app.search_mode = false;
            app.focus = Focus::Movies;
        }
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::NavDown) => app.nav_down(),
        Some(KbAction::NavUp) => app.nav_up(),
        Some(KbAction::NextPage) => app.next_page(),
        Some(KbAction::PrevPage) => app.prev_page(),
        _ => {}
    }
    Action::Continue
}

fn handle_browse_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    let context = focus_to_context(app.focus);
    let Some(action) = app.keybindings.action_for_key(code, modifiers, context) else {
        return Action::Continue;
    };

    match action {
        KbAction::Quit => return Action::Quit,
        KbAction::NavDown => app.nav_down(),
        KbAction::NavUp => app.nav_up(),
        KbAction::CycleFocus => app.cycle_focus(),
        KbAction::Back => {
            if !app.search_input.is_empty() {
                app.clear_search();
                app.set_status("Search cleared");
            }
        }
        KbAction::Select => {
            if app.focus == Focus::Genres {
                app.select_genre_at_cursor();
            }
        }
        KbAction::ToggleLike => match app.toggle_like_selected() {
            Some(true) => app.set_status("Liked"),
            Some(false) => app.set_status("Unliked"),
            None => {}
        },
        KbAction::DeleteMovie => {
            if let Some(pending) = app.begin_delete_selected() {
                app.set_status(format!("Deleting \"{}\"...", pending.movie().title));
                spawn_delete(app, pending, event_tx);
            }
        }
        KbAction::EnterSearch => app.enter_search(),
        KbAction::NextPage => app.next_page(),
        KbAction::PrevPage => app.prev_page(),
        KbAction::SortByTitle => sort(app, SortField::Title),
        KbAction::SortByGenre => sort(app, SortField::Genre),
        KbAction::SortByStock => sort(app, SortField::Stock),
        KbAction::SortByRate => sort(app, SortField::Rate),
        KbAction::CycleTheme => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        KbAction::ShowHelp => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        // Search-only actions
        KbAction::ExitSearch | KbAction::CommitSearch => {}
    }
    Action::Continue
}

fn sort(app: &mut App, field: SortField) {
    app.sort_by_field(field);
    let sort = app.catalog.selection().sort();
    app.set_status(format!(
        "Sorted by {} {}",
        sort.field.label(),
        sort.order.indicator()
    ));
}
