//! markshelf - terminal bookmark manager
//!
//! Bookmarks with tags, pins, archiving and visit tracking, persisted as
//! JSON in the data directory. The same store and query engine back both
//! the ratatui TUI and the scripting CLI.

pub mod app;
pub mod cli;
pub mod config;
pub mod desktop;
pub mod error;
pub mod favicon;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod query;
pub mod store;
pub mod ui;
