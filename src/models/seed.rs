//! Demo bookmarks installed on first launch.

use crate::models::Bookmark;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn seed(
    title: &str,
    description: &str,
    url: &str,
    tags: &[&str],
    pinned: bool,
    views: u64,
    last_visited: Option<DateTime<Utc>>,
    date_added: DateTime<Utc>,
) -> Bookmark {
    Bookmark {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        description: description.to_string(),
        url: url.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        pinned,
        archived: false,
        views,
        last_visited,
        date_added,
    }
}

/// Returns the seed collection. Ids are fresh on every call; the store
/// persists the first set it installs so later loads see the same ids.
pub fn seed_bookmarks() -> Vec<Bookmark> {
    vec![
        seed(
            "Frontend Mentor",
            "Improve your front-end coding skills by building real projects. Solve real-world HTML, CSS and JavaScript challenges.",
            "https://www.frontendmentor.io",
            &["Practice", "Learning", "Community"],
            false,
            47,
            Some(at(2025, 1, 15, 10)),
            at(2024, 9, 23, 8),
        ),
        seed(
            "MDN Web Docs",
            "Reference docs about Web technologies (HTML, CSS, JS).",
            "https://developer.mozilla.org",
            &["Reference", "HTML", "CSS", "JavaScript"],
            false,
            152,
            Some(at(2025, 1, 10, 11)),
            at(2024, 9, 24, 8),
        ),
        seed(
            "React Docs",
            "The library for web and native user interfaces.",
            "https://react.dev",
            &["JavaScript", "Framework", "Reference"],
            false,
            0,
            None,
            at(2025, 2, 20, 9),
        ),
        seed(
            "Tailwind CSS",
            "A utility-first CSS framework for rapidly building modern websites.",
            "https://tailwindcss.com",
            &["CSS", "Framework", "Tools"],
            true,
            52,
            Some(at(2024, 9, 12, 9)),
            at(2024, 9, 19, 8),
        ),
    ]
}
