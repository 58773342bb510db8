use crate::error::ValidationError;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved link and its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    #[serde(default, alias = "desc")]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub last_visited: Option<DateTime<Utc>>,
    pub date_added: DateTime<Utc>,
}

/// The user-editable subset of a bookmark, as submitted by the add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkFields {
    pub title: String,
    pub description: String,
    pub url: String,
    pub tags: Vec<String>,
}

impl BookmarkFields {
    /// Builds fields from raw form input. Every field is trimmed and the tag
    /// string is split on commas.
    pub fn from_input(title: &str, description: &str, url: &str, tags: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            url: url.trim().to_string(),
            tags: parse_tags(tags),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingUrl);
        }
        Ok(())
    }
}

impl Bookmark {
    /// Creates a fresh bookmark with a new id, stamped with the current time.
    pub fn new(fields: BookmarkFields) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: fields.title,
            description: fields.description,
            url: fields.url,
            tags: fields.tags,
            pinned: false,
            archived: false,
            views: 0,
            last_visited: None,
            date_added: Utc::now(),
        }
    }

    /// Overwrites the mutable fields. Id, counters, flags and dates stay.
    pub fn apply(&mut self, fields: BookmarkFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.url = fields.url;
        self.tags = fields.tags;
    }

    pub fn fields(&self) -> BookmarkFields {
        BookmarkFields {
            title: self.title.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Counts a visit. The timestamp never moves backwards, even if the
    /// system clock does.
    pub fn mark_visited(&mut self, now: DateTime<Utc>) {
        self.views += 1;
        self.last_visited = Some(match self.last_visited {
            Some(previous) => previous.max(now),
            None => now,
        });
    }

    pub fn has_any_tag<'a, I>(&self, wanted: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        wanted.into_iter().any(|tag| self.tags.contains(tag))
    }

    pub fn tags_display(&self) -> String {
        self.tags.join(", ")
    }
}

/// Splits comma-separated tag input, trimming each entry and dropping
/// empties. Duplicates are kept in input order.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Formats a timestamp in local time, or "Never" when absent.
pub fn readable(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(ts) => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "Never".to_string(),
    }
}
