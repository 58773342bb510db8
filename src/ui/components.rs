//! UI Components and Layout Module
//!
//! Reusable pieces shared by the bookmark screen and its popups: the bottom
//! navigation bar, the toast line, popup placement and width-aware text
//! truncation.

use crate::app::{App, InputMode, ToastKind};
use crate::models::Backend;
use crate::query::ViewMode;
use crate::ui::colors::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Renders the bottom navigation bar: where you are on the left, the
/// shortcuts that apply right now on the right.
pub fn render_bottom_bar<B: Backend>(frame: &mut Frame, area: Rect, app: &App<B>, palette: &Palette) {
    let navbar_chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(2)]).split(area);

    let left_content = Paragraph::new(get_breadcrumbs(app, palette))
        .alignment(Alignment::Left)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(palette.highlight_high)),
        );

    let right_content = Paragraph::new(get_context_shortcuts(app))
        .alignment(Alignment::Right)
        .style(Style::default().fg(palette.muted))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(palette.highlight_high)),
        );

    left_content.render(navbar_chunks[0], frame.buffer_mut());
    right_content.render(navbar_chunks[1], frame.buffer_mut());
}

fn get_breadcrumbs<B: Backend>(app: &App<B>, palette: &Palette) -> Line<'static> {
    let view_icon = match app.session.view {
        ViewMode::All => "󰃀",
        ViewMode::Archived => "󰀼",
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} {} ", view_icon, app.session.view.title()),
            Style::default().fg(palette.base).bg(palette.iris),
        ),
        Span::styled(" › ", Style::default().fg(palette.muted)),
        Span::styled(
            app.session.sort.display_name().to_string(),
            Style::default().fg(palette.subtle),
        ),
    ];

    if !app.session.filter_tags.is_empty() {
        spans.push(Span::styled(" › ", Style::default().fg(palette.muted)));
        spans.push(Span::styled(
            format!("{} tags", app.session.filter_tags.len()),
            Style::default().fg(palette.gold),
        ));
    }

    Line::from(spans)
}

fn get_context_shortcuts<B: Backend>(app: &App<B>) -> String {
    match app.input_mode {
        InputMode::Search => " [type] Filter titles │ [⏎/Esc] Done ".to_string(),
        InputMode::Form => " [Tab] Next field │ [⏎] Save │ [Esc] Cancel ".to_string(),
        InputMode::Tags => {
            " [↑↓] Navigate │ [Space] Toggle │ [r] Reset │ [Tab] Bookmarks ".to_string()
        }
        InputMode::Help => " [any key] Close ".to_string(),
        InputMode::Normal => {
            if app.visible().is_empty() {
                " [a] Add │ [/] Search │ [1/2] View │ [Tab] Tags │ [?] Help │ [q] Quit ".to_string()
            } else {
                " [⏎] Visit │ [c] Copy │ [e] Edit │ [x] Archive │ [p] Pin │ [a] Add │ [/] Search │ [s] Sort │ [?] Help "
                    .to_string()
            }
        }
    }
}

/// Renders the toast line if a notification is active.
pub fn render_toast<B: Backend>(frame: &mut Frame, area: Rect, app: &App<B>, palette: &Palette) {
    let Some(toast) = &app.toast else {
        return;
    };

    let (icon, color) = match toast.kind {
        ToastKind::Success => ("✓", palette.foam),
        ToastKind::Error => ("✗", palette.love),
    };

    Paragraph::new(format!("{} {}", icon, toast.message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).bold())
        .render(area, frame.buffer_mut());
}

/// A centered rectangle of at most `width` x `height` inside `area`.
pub fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Cuts `text` to at most `max_width` terminal columns, ending in `…` when
/// anything was dropped.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
