//! Favicon URL derivation. The image itself is fetched by whoever renders it.

use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://www.google.com/s2/favicons?domain={host}&sz={size}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaviconConfig {
    /// Endpoint template with `{host}` and `{size}` placeholders.
    pub endpoint: String,
    pub size: u32,
}

impl Default for FaviconConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            size: 64,
        }
    }
}

/// Host of a bookmark url, if it parses and has one.
pub fn hostname(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
}

/// Icon URL for a bookmark, or an empty string when the url is malformed.
pub fn favicon_url(url: &str, config: &FaviconConfig) -> String {
    match hostname(url) {
        Some(host) => config
            .endpoint
            .replace("{host}", &host)
            .replace("{size}", &config.size.to_string()),
        None => String::new(),
    }
}
