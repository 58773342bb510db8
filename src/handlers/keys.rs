//! Keyboard Input Handling Module
//!
//! Translates key events into [`Intent`]s for the current input mode.
//! Cursor movement and mode switches are handled here directly; anything
//! that touches bookmarks or filters goes through `App::dispatch`.

use crate::app::{App, InputMode, Intent};
use crate::models::Backend;
use crate::query::ViewMode;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Main keyboard event handler and dispatcher. Returns true when the
/// application should quit.
pub fn handle_key_events<B: Backend>(key: KeyEvent, app: &mut App<B>) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_keys(key, app),
        InputMode::Search => {
            handle_search_keys(key, app);
            false
        }
        InputMode::Form => {
            handle_form_keys(key, app);
            false
        }
        InputMode::Tags => {
            handle_tag_keys(key, app);
            false
        }
        InputMode::Help => {
            app.input_mode = InputMode::Normal;
            false
        }
    }
}

fn handle_normal_keys<B: Backend>(key: KeyEvent, app: &mut App<B>) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Char('?') => app.input_mode = InputMode::Help,
        KeyCode::Down | KeyCode::Char('j') => app.next_item(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_item(),
        KeyCode::Enter | KeyCode::Char('v') => app.dispatch(Intent::Visit),
        KeyCode::Char('c') | KeyCode::Char('y') => app.dispatch(Intent::CopyUrl),
        KeyCode::Char('e') => app.dispatch(Intent::OpenEditForm),
        KeyCode::Char('a') | KeyCode::Char('n') => app.dispatch(Intent::OpenAddForm),
        KeyCode::Char('p') => app.dispatch(Intent::TogglePin),
        KeyCode::Char('x') => app.dispatch(Intent::ToggleArchive),
        KeyCode::Char('s') => app.dispatch(Intent::CycleSort),
        KeyCode::Char('r') => app.dispatch(Intent::ResetFilters),
        KeyCode::Char('t') => app.dispatch(Intent::ToggleTheme),
        KeyCode::Char('1') | KeyCode::Char('h') => app.dispatch(Intent::ShowView(ViewMode::All)),
        KeyCode::Char('2') => app.dispatch(Intent::ShowView(ViewMode::Archived)),
        KeyCode::Char('/') => app.input_mode = InputMode::Search,
        KeyCode::Tab => app.input_mode = InputMode::Tags,
        _ => {}
    }
    false
}

/// Every keystroke re-filters, as the search box does in the browser.
fn handle_search_keys<B: Backend>(key: KeyEvent, app: &mut App<B>) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => {
            let mut query = app.session.query.clone();
            query.pop();
            app.dispatch(Intent::SetQuery(query));
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.dispatch(Intent::SetQuery(String::new()));
        }
        KeyCode::Char(c) => {
            let query = format!("{}{}", app.session.query, c);
            app.dispatch(Intent::SetQuery(query));
        }
        _ => {}
    }
}

fn handle_form_keys<B: Backend>(key: KeyEvent, app: &mut App<B>) {
    match key.code {
        KeyCode::Esc => app.dispatch(Intent::CloseForm),
        KeyCode::Enter => app.dispatch(Intent::SubmitForm),
        KeyCode::Tab | KeyCode::Down => app.form.focus = app.form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus = app.form.focus.previous(),
        KeyCode::Backspace => {
            app.form.focused_mut().pop();
        }
        KeyCode::Char(c) => app.form.focused_mut().push(c),
        _ => {}
    }
}

fn handle_tag_keys<B: Backend>(key: KeyEvent, app: &mut App<B>) {
    match key.code {
        KeyCode::Tab | KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Down | KeyCode::Char('j') => app.next_tag(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_tag(),
        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some((tag, _)) = app.tags().get(app.selected_tag).cloned() {
                app.dispatch(Intent::ToggleTag(tag));
            }
        }
        KeyCode::Char('r') => app.dispatch(Intent::ResetFilters),
        KeyCode::Char('q') => app.input_mode = InputMode::Normal,
        _ => {}
    }
}
