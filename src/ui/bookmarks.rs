use crate::app::{App, InputMode};
use crate::favicon::hostname;
use crate::models::{Backend, Bookmark, readable};
use crate::query::ViewMode;
use crate::ui::colors::Palette;
use crate::ui::components::{render_bottom_bar, render_toast, truncate};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, ListState, Paragraph, Tabs, Widget, Wrap},
};

const SIDEBAR_WIDTH: u16 = 30;

pub fn render<B: Backend>(frame: &mut Frame, app: &App<B>, palette: &Palette) {
    let main_area = frame.area();

    Block::default()
        .style(Style::default().bg(palette.base))
        .render(main_area, frame.buffer_mut());

    let block = Block::bordered()
        .title(" 󰃀 markshelf ")
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(palette.highlight_high));

    let inner_area = block.inner(main_area);
    block.render(main_area, frame.buffer_mut());

    let main_chunks = Layout::vertical([
        Constraint::Length(3), // View tabs, search box, sort selector
        Constraint::Fill(1),   // Sidebar + list
        Constraint::Length(1), // Toast
        Constraint::Length(3), // Bottom navigation bar
    ])
    .split(inner_area);

    let content_chunks =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)])
            .split(main_chunks[1]);

    render_header(frame, main_chunks[0], app, palette);
    render_tag_sidebar(frame, content_chunks[0], app, palette);
    render_bookmark_list(frame, content_chunks[1], app, palette);
    render_toast(frame, main_chunks[2], app, palette);
    render_bottom_bar(frame, main_chunks[3], app, palette);
}

fn render_header<B: Backend>(frame: &mut Frame, area: Rect, app: &App<B>, palette: &Palette) {
    let chunks = Layout::horizontal([
        Constraint::Length(SIDEBAR_WIDTH),
        Constraint::Fill(1),
        Constraint::Length(24),
    ])
    .split(area);

    let selected_tab = match app.session.view {
        ViewMode::All => 0,
        ViewMode::Archived => 1,
    };
    let tabs = Tabs::new(vec![" 1 Home ", " 2 Archived "])
        .select(selected_tab)
        .style(Style::default().fg(palette.subtle))
        .highlight_style(Style::default().fg(palette.base).bg(palette.iris).bold())
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(palette.highlight_high)),
        );
    tabs.render(chunks[0], frame.buffer_mut());

    let searching = app.input_mode == InputMode::Search;
    let search_text = if app.session.query.is_empty() && !searching {
        Span::styled("Search by title...", Style::default().fg(palette.muted).italic())
    } else if searching {
        Span::styled(
            format!("{}▏", app.session.query),
            Style::default().fg(palette.text),
        )
    } else {
        Span::styled(app.session.query.clone(), Style::default().fg(palette.text))
    };
    let search_border = if searching {
        palette.iris
    } else {
        palette.highlight_high
    };
    Paragraph::new(Line::from(vec![
        Span::styled(" ", Style::default().fg(palette.subtle)),
        search_text,
    ]))
    .block(
        Block::bordered()
            .title(" Search ")
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(search_border)),
    )
    .render(chunks[1], frame.buffer_mut());

    Paragraph::new(Span::styled(
        app.session.sort.display_name(),
        Style::default().fg(palette.gold),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::bordered()
            .title(" Sort [s] ")
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.highlight_high)),
    )
    .render(chunks[2], frame.buffer_mut());
}

fn render_tag_sidebar<B: Backend>(frame: &mut Frame, area: Rect, app: &App<B>, palette: &Palette) {
    let focused = app.input_mode == InputMode::Tags;
    let block = Block::bordered()
        .title(" Tags ")
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused {
            palette.iris
        } else {
            palette.highlight_high
        }));

    let tags = app.tags();
    if tags.is_empty() {
        Paragraph::new("No tags yet")
            .style(Style::default().fg(palette.muted))
            .alignment(Alignment::Center)
            .block(block)
            .render(area, frame.buffer_mut());
        return;
    }

    let label_width = usize::from(SIDEBAR_WIDTH).saturating_sub(12);
    let items: Vec<ListItem> = tags
        .iter()
        .map(|(tag, count)| {
            let checked = app.session.filter_tags.contains(tag);
            let checkbox = if checked { "[x]" } else { "[ ]" };
            let label = truncate(tag, label_width);
            let padding = label_width.saturating_sub(unicode_width::UnicodeWidthStr::width(label.as_str()));

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", checkbox),
                    Style::default().fg(if checked { palette.gold } else { palette.muted }),
                ),
                Span::styled(
                    format!("{}{} ", label, " ".repeat(padding)),
                    Style::default().fg(palette.text),
                ),
                Span::styled(format!("{:>3}", count), Style::default().fg(palette.subtle)),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.selected_tag));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(palette.highlight_low).bold());
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_bookmark_list<B: Backend>(
    frame: &mut Frame,
    area: Rect,
    app: &App<B>,
    palette: &Palette,
) {
    let visible = app.visible();
    let block = Block::bordered()
        .title(format!(" {} ({}) ", app.session.view.title(), visible.len()))
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if app.input_mode == InputMode::Normal {
            palette.iris
        } else {
            palette.highlight_high
        }));

    if visible.is_empty() {
        let empty_text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No bookmarks found",
                Style::default().fg(palette.love).bold(),
            )),
            Line::from(""),
            Line::from("Try a different search or tag selection,"),
            Line::from("or press 'a' to add a bookmark."),
        ];
        Paragraph::new(empty_text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(palette.subtle))
            .block(block)
            .render(area, frame.buffer_mut());
        return;
    }

    let width = usize::from(area.width.saturating_sub(4));
    let items: Vec<ListItem> = visible
        .iter()
        .map(|bookmark| bookmark_item(bookmark, width, palette))
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.selected.min(visible.len() - 1)));

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(palette.highlight_low))
        .highlight_symbol("▌");
    frame.render_stateful_widget(list, area, &mut state);
}

fn bookmark_item<'a>(bookmark: &Bookmark, width: usize, palette: &Palette) -> ListItem<'a> {
    let mut title_line = Vec::new();
    if bookmark.pinned {
        title_line.push(Span::styled(
            " PINNED ",
            Style::default().fg(palette.base).bg(palette.rose).bold(),
        ));
        title_line.push(Span::raw(" "));
    }
    title_line.push(Span::styled(
        truncate(&bookmark.title, width.saturating_sub(30)),
        Style::default().fg(palette.text).bold(),
    ));
    if let Some(host) = hostname(&bookmark.url) {
        title_line.push(Span::styled(
            format!("  {}", host),
            Style::default().fg(palette.muted),
        ));
    }

    let mut lines = vec![
        Line::from(title_line),
        Line::from(Span::styled(
            truncate(&bookmark.url, width),
            Style::default().fg(palette.foam),
        )),
    ];

    if !bookmark.description.is_empty() {
        lines.push(Line::from(Span::styled(
            truncate(&bookmark.description, width),
            Style::default().fg(palette.subtle),
        )));
    }

    if !bookmark.tags.is_empty() {
        let pills: Vec<Span> = bookmark
            .tags
            .iter()
            .flat_map(|tag| {
                [
                    Span::styled(format!("#{}", tag), Style::default().fg(palette.gold)),
                    Span::raw(" "),
                ]
            })
            .collect();
        lines.push(Line::from(pills));
    }

    lines.push(Line::from(Span::styled(
        format!(
            "󰈈 {} • Last: {} • Added: {}",
            bookmark.views,
            readable(bookmark.last_visited),
            readable(Some(bookmark.date_added)),
        ),
        Style::default().fg(palette.muted),
    )));
    lines.push(Line::from(""));

    ListItem::new(lines)
}
