//! User Interface Module
//!
//! Rendering for the bookmark screen and its popups. Every frame is drawn
//! from the current Store and Session; nothing here mutates state.

pub mod bookmarks;
pub mod colors;
pub mod components;
pub mod form;

use crate::app::{App, InputMode};
use crate::models::Backend;
use colors::RosePine;
use ratatui::Frame;

pub fn render<B: Backend>(frame: &mut Frame, app: &App<B>) {
    let palette = RosePine::palette(app.dark_theme);

    bookmarks::render(frame, app, &palette);

    match app.input_mode {
        InputMode::Form => form::render_form(frame, app, &palette),
        InputMode::Help => form::render_help(frame, &palette),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::app::tests::app_with;
    use crate::app::{InputMode, Intent};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    const ONE_BOOKMARK: &str = r#"[{
        "id": "a1",
        "title": "Alpha",
        "description": "first",
        "url": "https://alpha.dev/docs",
        "tags": ["x"],
        "pinned": true,
        "archived": false,
        "views": 5,
        "lastVisited": null,
        "dateAdded": "2024-09-23T08:00:00Z"
    }]"#;

    #[test]
    fn renders_bookmark_and_tag_sidebar() {
        let (app, _) = app_with(ONE_BOOKMARK);
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Alpha"));
        assert!(text.contains("PINNED"));
        assert!(text.contains("alpha.dev"));
        assert!(text.contains("Last: Never"));
        assert!(text.contains("[ ] x"));
    }

    #[test]
    fn renders_empty_state_and_form_popup() {
        let (mut app, _) = app_with("[]");
        app.dispatch(Intent::OpenAddForm);
        assert_eq!(app.input_mode, InputMode::Form);

        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("No tags yet"));
        assert!(text.contains("Add Bookmark"));
        assert!(text.contains("Title *"));
    }
}
