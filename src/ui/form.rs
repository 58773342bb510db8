//! Floating add/edit form and help popups.

use crate::app::{App, FormField};
use crate::models::Backend;
use crate::ui::colors::Palette;
use crate::ui::components::popup_area;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};

pub fn render_form<B: Backend>(frame: &mut Frame, app: &App<B>, palette: &Palette) {
    let area = popup_area(frame.area(), 70, 17);
    Clear.render(area, frame.buffer_mut());

    let title = if app.session.editing_id.is_some() {
        " Edit Bookmark "
    } else {
        " Add Bookmark "
    };

    let popup_block = Block::bordered()
        .title(title)
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(palette.iris).bg(palette.surface));

    let inner_area = popup_block.inner(area);
    popup_block.render(area, frame.buffer_mut());

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(inner_area);

    for (index, field) in FormField::ALL.iter().enumerate() {
        let focused = app.form.focus == *field;
        let value = app.form.value(*field);
        let content = if focused {
            format!("{}▏", value)
        } else {
            value.to_string()
        };

        Paragraph::new(content)
            .style(Style::default().fg(palette.text))
            .block(
                Block::bordered()
                    .title(format!(" {} ", field.label()))
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(if focused {
                        palette.gold
                    } else {
                        palette.highlight_high
                    })),
            )
            .render(chunks[index], frame.buffer_mut());
    }

    Paragraph::new("[Tab] Next field │ [⏎] Save │ [Esc] Cancel")
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.muted))
        .render(chunks[5], frame.buffer_mut());
}

pub fn render_help(frame: &mut Frame, palette: &Palette) {
    let area = popup_area(frame.area(), 56, 24);
    Clear.render(area, frame.buffer_mut());

    let popup_block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(palette.love).bg(palette.surface));

    let inner_area = popup_block.inner(area);
    popup_block.render(area, frame.buffer_mut());

    let shortcuts = [
        ("↑↓ / j k", "Move selection"),
        ("⏎ / v", "Visit (opens browser, counts a view)"),
        ("c", "Copy URL"),
        ("e", "Edit bookmark"),
        ("a", "Add bookmark"),
        ("p", "Pin / unpin"),
        ("x", "Archive / unarchive"),
        ("/", "Search titles"),
        ("s", "Cycle sort order"),
        ("1 / 2", "All / archived bookmarks"),
        ("Tab", "Focus tag filters"),
        ("r", "Reset tag filters"),
        ("t", "Toggle light / dark theme"),
        ("q", "Quit"),
    ];

    let mut lines: Vec<Line> = shortcuts
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:>10}  ", key), Style::default().fg(palette.gold).bold()),
                Span::styled(*action, Style::default().fg(palette.text)),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(palette.muted),
    )));

    Paragraph::new(lines).render(inner_area, frame.buffer_mut());
}
