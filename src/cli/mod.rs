//! CLI Module for markshelf
//! Command-line access to the bookmark store for scripting, without
//! launching the full TUI. Running with no subcommand starts the TUI.

pub mod commands;

use crate::config::Config;
use crate::query::SortMode;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::Path;

#[derive(Debug, Parser)]
#[command(
    name = "markshelf",
    version,
    about = "A terminal bookmark manager with tags, search, pins and visit tracking"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List bookmarks, pinned first
    #[command(alias = "ls")]
    List {
        /// Show archived bookmarks instead of active ones
        #[arg(long)]
        archived: bool,
        /// Case-insensitive title search
        #[arg(short, long)]
        query: Option<String>,
        /// Only bookmarks with any of these tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// default, recent, visited or most
        #[arg(short, long, default_value_t = SortMode::Default)]
        sort: SortMode,
    },
    /// Add a bookmark
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Edit a bookmark; omitted fields keep their current value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Comma-separated tags, replacing the current ones
        #[arg(long)]
        tags: Option<String>,
    },
    /// Show one bookmark in full
    #[command(aliases = ["view", "cat"])]
    Show { id: String },
    /// Count a visit and print the url
    Visit {
        id: String,
        /// Also open the url in the default browser
        #[arg(long)]
        open: bool,
    },
    /// Copy a bookmark's url to the clipboard
    Copy { id: String },
    /// Pin or unpin a bookmark
    Pin { id: String },
    /// Archive or unarchive a bookmark
    Archive { id: String },
    /// List tags of active bookmarks with counts
    Tags,
    /// Show or set the TUI theme
    Theme { mode: Option<ThemeChoice> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Dark,
    Light,
}

/// Executes a CLI subcommand against the store in `data_dir`.
pub fn execute(command: Command, config: &Config, data_dir: &Path) -> anyhow::Result<()> {
    let mut store = commands::open_store(data_dir)?;

    match command {
        Command::List {
            archived,
            query,
            tags,
            sort,
        } => commands::list(&store, archived, query, tags, sort),
        Command::Add {
            title,
            url,
            description,
            tags,
        } => commands::add(&mut store, &title, &description, &url, &tags),
        Command::Edit {
            id,
            title,
            url,
            description,
            tags,
        } => commands::edit(&mut store, &id, title, description, url, tags),
        Command::Show { id } => commands::show(&store, &id, &config.favicon),
        Command::Visit { id, open } => commands::visit(&mut store, &id, open),
        Command::Copy { id } => commands::copy(&store, &id),
        Command::Pin { id } => commands::pin(&mut store, &id),
        Command::Archive { id } => commands::archive(&mut store, &id),
        Command::Tags => commands::tags(&store),
        Command::Theme { mode } => commands::theme(&mut store, mode),
    }
}

/// Prints an error in the CLI's gutter style.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{}  {} {:#}", "┃".bright_magenta(), "Error:".bright_red().bold(), err);
}
