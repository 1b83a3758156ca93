use std::path::{Path, MAIN_SEPARATOR};
use std::sync::OnceLock;

use regex::Regex;

fn video_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Same shape as YouTube's own share links: `watch?v=<id>`, `youtu.be/<id>`,
        // `/embed/<id>`, `/shorts/<id>`.
        Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("video id pattern is valid")
    })
}

/// Extract the 11 character video id from a YouTube URL.
pub fn extract_video_id(url: &str) -> Option<String> {
    video_id_pattern()
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Render a directory for the "Save To" field, always ending in a separator.
pub fn with_trailing_separator(dir: &Path) -> String {
    let mut text = dir.display().to_string();
    if !text.ends_with(MAIN_SEPARATOR) && !text.ends_with('/') {
        text.push(MAIN_SEPARATOR);
    }
    text
}

/// Current working directory as shown in the "Save To" field.
pub fn default_save_dir() -> String {
    match std::env::current_dir() {
        Ok(dir) => with_trailing_separator(&dir),
        Err(e) => {
            log::warn!("Cannot read current directory, saving to '.': {}", e);
            with_trailing_separator(Path::new("."))
        }
    }
}
