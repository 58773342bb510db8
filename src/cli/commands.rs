use crate::cli::ThemeChoice;
use crate::desktop::{Desktop, SystemDesktop};
use crate::error::StoreError;
use crate::favicon::{FaviconConfig, favicon_url, hostname};
use crate::models::{Bookmark, BookmarkFields, FileBackend, parse_tags, readable};
use crate::query::{Session, SortMode, ViewMode, ranked_tags, tag_frequency, visible_list};
use crate::store::{LoadSource, Store};
use anyhow::{Context, Result, bail};
use colored::Colorize;
use std::path::Path;

pub fn open_store(data_dir: &Path) -> Result<Store<FileBackend>> {
    let backend = FileBackend::new(data_dir).context("Failed to open data directory")?;
    let store = Store::load(backend).context("Failed to load bookmarks")?;

    if store.load_source() == LoadSource::Recovered {
        eprintln!(
            "{}  {}",
            "┃".bright_magenta(),
            "Saved bookmarks were unreadable; starting from an empty list".yellow()
        );
    }

    Ok(store)
}

/// Finds a bookmark id by exact match or unique prefix.
pub fn resolve_id(store: &Store<FileBackend>, needle: &str) -> Result<String> {
    if store.get(needle).is_some() {
        return Ok(needle.to_string());
    }

    let matches: Vec<&Bookmark> = store
        .bookmarks()
        .iter()
        .filter(|b| !needle.is_empty() && b.id.starts_with(needle))
        .collect();

    match matches.as_slice() {
        [single] => Ok(single.id.clone()),
        [] => Err(StoreError::NotFound(needle.to_string()).into()),
        many => bail!(
            "ID prefix '{}' is ambiguous ({} bookmarks match)",
            needle,
            many.len()
        ),
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn separator() {
    println!("{}", "─".repeat(60).bright_magenta());
}

/// Lists bookmarks through the same query pipeline the TUI uses.
pub fn list(
    store: &Store<FileBackend>,
    archived: bool,
    query: Option<String>,
    tags: Vec<String>,
    sort: SortMode,
) -> Result<()> {
    let session = Session {
        query: query.unwrap_or_default(),
        view: if archived {
            ViewMode::Archived
        } else {
            ViewMode::All
        },
        sort,
        filter_tags: tags.into_iter().collect(),
        editing_id: None,
    };

    let visible = visible_list(store.bookmarks(), &session);

    println!(
        "{}  {} ({})",
        "┃".bright_magenta(),
        session.view.title().to_uppercase().bold(),
        visible.len()
    );

    if visible.is_empty() {
        println!("{}  No bookmarks found.", "┃".bright_magenta());
        return Ok(());
    }

    separator();
    for (idx, bookmark) in visible.iter().enumerate() {
        let pin = if bookmark.pinned {
            format!("{} ", "PINNED".bright_red().bold())
        } else {
            String::new()
        };

        println!(
            "{}  {}. {}{}",
            "┃".bright_magenta(),
            (idx + 1).to_string().bright_yellow(),
            pin,
            bookmark.title.bright_white().bold()
        );
        println!("{}     {}", "┃".bright_magenta(), bookmark.url.bright_cyan());
        if !bookmark.tags.is_empty() {
            println!(
                "{}     {}: {}",
                "┃".bright_magenta(),
                "Tags".bright_green(),
                bookmark.tags_display()
            );
        }
        println!(
            "{}     {}: {}  {}: {}  {}: {}",
            "┃".bright_magenta(),
            "Views".bright_blue(),
            bookmark.views,
            "Last".bright_blue(),
            readable(bookmark.last_visited),
            "ID".bright_black(),
            short_id(&bookmark.id)
        );

        if idx < visible.len() - 1 {
            println!(
                "{}  {}",
                "┃".bright_magenta(),
                "─".repeat(40).bright_black()
            );
        }
    }

    Ok(())
}

pub fn add(
    store: &mut Store<FileBackend>,
    title: &str,
    description: &str,
    url: &str,
    tags: &str,
) -> Result<()> {
    let fields = BookmarkFields::from_input(title, description, url, tags);
    let bookmark = store.create(fields)?;

    println!(
        "{}  {} {}",
        "┃".bright_magenta(),
        "Bookmark added:".bright_green(),
        bookmark.title.bold()
    );
    println!("{}  {}: {}", "┃".bright_magenta(), "ID".bright_black(), bookmark.id);
    Ok(())
}

pub fn edit(
    store: &mut Store<FileBackend>,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    tags: Option<String>,
) -> Result<()> {
    let id = resolve_id(store, id)?;
    let current = store
        .get(&id)
        .map(Bookmark::fields)
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;

    let fields = BookmarkFields {
        title: title.map(|t| t.trim().to_string()).unwrap_or(current.title),
        description: description
            .map(|d| d.trim().to_string())
            .unwrap_or(current.description),
        url: url.map(|u| u.trim().to_string()).unwrap_or(current.url),
        tags: tags.map(|t| parse_tags(&t)).unwrap_or(current.tags),
    };

    let bookmark = store.update(&id, fields)?;
    println!(
        "{}  {} {}",
        "┃".bright_magenta(),
        "Bookmark updated:".bright_green(),
        bookmark.title.bold()
    );
    Ok(())
}

pub fn show(store: &Store<FileBackend>, id: &str, favicon: &FaviconConfig) -> Result<()> {
    let id = resolve_id(store, id)?;
    let bookmark = store
        .get(&id)
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;

    println!(
        "{}  {} {}",
        "┃".bright_magenta(),
        "BOOKMARK".bright_green().bold(),
        bookmark.title.bold()
    );
    separator();

    let icon = favicon_url(&bookmark.url, favicon);
    let host = hostname(&bookmark.url).unwrap_or_else(|| "-".to_string());
    let rows = [
        ("URL".bright_cyan(), bookmark.url.clone()),
        ("Host".bright_cyan(), host),
        ("Description".bright_cyan(), bookmark.description.clone()),
        ("Tags".bright_green(), bookmark.tags_display()),
        ("Pinned".bright_yellow(), bookmark.pinned.to_string()),
        ("Archived".bright_yellow(), bookmark.archived.to_string()),
        ("Views".bright_blue(), bookmark.views.to_string()),
        ("Last visited".bright_blue(), readable(bookmark.last_visited)),
        ("Added".bright_blue(), readable(Some(bookmark.date_added))),
        ("Favicon".bright_magenta(), icon),
        ("ID".bright_black(), bookmark.id.clone()),
    ];

    for (label, value) in rows {
        println!("{}  {}: {}", "┃".bright_magenta(), label, value);
    }

    Ok(())
}

pub fn visit(store: &mut Store<FileBackend>, id: &str, open: bool) -> Result<()> {
    let id = resolve_id(store, id)?;
    let bookmark = store.record_visit(&id)?;
    let url = bookmark.url.clone();

    println!("{}", url);

    if open {
        SystemDesktop::new().open_url(&url)?;
    }
    Ok(())
}

pub fn copy(store: &Store<FileBackend>, id: &str) -> Result<()> {
    let id = resolve_id(store, id)?;
    let bookmark = store
        .get(&id)
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;

    SystemDesktop::new().copy_text(&bookmark.url)?;
    println!("{}  {}", "┃".bright_magenta(), "URL copied".bright_green());
    Ok(())
}

pub fn pin(store: &mut Store<FileBackend>, id: &str) -> Result<()> {
    let id = resolve_id(store, id)?;
    let pinned = store.toggle_pinned(&id)?;
    println!(
        "{}  {}",
        "┃".bright_magenta(),
        if pinned { "Pinned" } else { "Unpinned" }.bright_green()
    );
    Ok(())
}

pub fn archive(store: &mut Store<FileBackend>, id: &str) -> Result<()> {
    let id = resolve_id(store, id)?;
    let archived = store.toggle_archived(&id)?;
    println!(
        "{}  {}",
        "┃".bright_magenta(),
        if archived { "Archived" } else { "Unarchived" }.bright_green()
    );
    Ok(())
}

pub fn tags(store: &Store<FileBackend>) -> Result<()> {
    let ranked = ranked_tags(&tag_frequency(store.bookmarks()));

    if ranked.is_empty() {
        println!("{}  No tags yet", "┃".bright_magenta());
        return Ok(());
    }

    println!("{}  {}", "┃".bright_magenta(), "TAGS".bold());
    separator();
    for (tag, count) in ranked {
        println!(
            "{}  {:<30} {}",
            "┃".bright_magenta(),
            tag.bright_white(),
            count.to_string().bright_yellow()
        );
    }
    Ok(())
}

pub fn theme(store: &mut Store<FileBackend>, mode: Option<ThemeChoice>) -> Result<()> {
    if let Some(mode) = mode {
        store.set_dark_theme(mode == ThemeChoice::Dark)?;
    }

    let current = if store.dark_theme() { "dark" } else { "light" };
    println!("{}  Theme: {}", "┃".bright_magenta(), current.bright_white());
    Ok(())
}
