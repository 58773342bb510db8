//! Query Engine
//!
//! Pure functions that turn the stored collection plus the session's search,
//! view, sort and tag selections into the list the UI shows. Nothing here
//! mutates; everything is re-run on each state change.

use crate::models::Bookmark;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Top-level filter selecting active vs archived bookmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    All,
    Archived,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::All => "all",
            ViewMode::Archived => "archived",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ViewMode::All => "All bookmarks",
            ViewMode::Archived => "Archived bookmarks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Insertion order.
    #[default]
    Default,
    /// Newest `dateAdded` first.
    Recent,
    /// Most recently visited first; never-visited sort last.
    Visited,
    /// Highest view count first.
    MostViewed,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::Default,
        SortMode::Recent,
        SortMode::Visited,
        SortMode::MostViewed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Default => "default",
            SortMode::Recent => "recent",
            SortMode::Visited => "visited",
            SortMode::MostViewed => "most",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortMode::Default => "Default",
            SortMode::Recent => "Recently added",
            SortMode::Visited => "Last visited",
            SortMode::MostViewed => "Most visited",
        }
    }

    /// The next option in selector order, wrapping around.
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|mode| mode == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" | "none" => Ok(SortMode::Default),
            "recent" => Ok(SortMode::Recent),
            "visited" => Ok(SortMode::Visited),
            "most" | "most-viewed" => Ok(SortMode::MostViewed),
            other => Err(format!(
                "unknown sort mode '{other}' (expected default, recent, visited or most)"
            )),
        }
    }
}

/// Transient UI state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub query: String,
    pub view: ViewMode,
    pub sort: SortMode,
    pub filter_tags: BTreeSet<String>,
    /// The bookmark open in the edit form, if any.
    pub editing_id: Option<String>,
}

impl Session {
    /// Adds the tag to the filter if absent, removes it otherwise. Returns
    /// whether the tag is now selected.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.filter_tags.remove(tag) {
            false
        } else {
            self.filter_tags.insert(tag.to_string());
            true
        }
    }

    pub fn reset_filters(&mut self) {
        self.filter_tags.clear();
    }

    fn matches(&self, bookmark: &Bookmark, query: &str) -> bool {
        let in_view = match self.view {
            ViewMode::All => !bookmark.archived,
            ViewMode::Archived => bookmark.archived,
        };
        if !in_view {
            return false;
        }

        if !query.is_empty() && !bookmark.title.to_lowercase().contains(query) {
            return false;
        }

        self.filter_tags.is_empty() || bookmark.has_any_tag(&self.filter_tags)
    }
}

/// Filters and sorts the collection for display. Pinned bookmarks always
/// precede unpinned ones, whatever the sort mode.
pub fn visible_list<'a>(bookmarks: &'a [Bookmark], session: &Session) -> Vec<&'a Bookmark> {
    let query = session.query.to_lowercase();
    let mut list: Vec<&Bookmark> = bookmarks
        .iter()
        .filter(|bookmark| session.matches(bookmark, &query))
        .collect();

    match session.sort {
        SortMode::Default => {}
        SortMode::Recent => list.sort_by_key(|b| Reverse(b.date_added)),
        SortMode::Visited => {
            list.sort_by_key(|b| Reverse(b.last_visited.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)))
        }
        SortMode::MostViewed => list.sort_by_key(|b| Reverse(b.views)),
    }

    // Both passes are stable: the sort order survives inside each partition.
    list.sort_by_key(|b| !b.pinned);
    list
}

/// Tag occurrence counts across non-archived bookmarks.
pub fn tag_frequency(bookmarks: &[Bookmark]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for bookmark in bookmarks.iter().filter(|b| !b.archived) {
        for tag in &bookmark.tags {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Tags ordered for the sidebar: most frequent first, ties by name.
pub fn ranked_tags(frequency: &BTreeMap<String, usize>) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = frequency
        .iter()
        .map(|(tag, count)| (tag.clone(), *count))
        .collect();
    // BTreeMap iteration is already name-ascending, so a stable sort on count
    // keeps ties alphabetical.
    ranked.sort_by_key(|(_, count)| Reverse(*count));
    ranked
}
