use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

/// A video the fetcher recognised, before anything was fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaHandle {
    pub video_id: String,
    pub watch_url: Url,
}

/// The stream picked for transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamChoice {
    pub format_id: String,
    pub ext: String,
    pub audio_only: bool,
    pub label: String,
}

/// Subset of `yt-dlp --dump-single-json` output
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VideoInfo {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub formats: Vec<FormatInfo>,
}

/// One entry of `formats` in yt-dlp's info JSON
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormatInfo {
    pub format_id: String,
    #[serde(default)]
    pub ext: String,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub abr: Option<f64>,
    #[serde(default)]
    pub tbr: Option<f64>,
}

fn has_codec(codec: &Option<String>) -> bool {
    matches!(codec.as_deref(), Some(c) if !c.is_empty() && c != "none")
}

impl FormatInfo {
    pub fn has_video(&self) -> bool {
        has_codec(&self.vcodec)
    }

    pub fn has_audio(&self) -> bool {
        has_codec(&self.acodec)
    }

    pub fn is_audio_only(&self) -> bool {
        self.has_audio() && matches!(self.vcodec.as_deref(), Some("none"))
    }

    pub fn is_progressive(&self) -> bool {
        self.has_video() && self.has_audio()
    }
}

/// Configuration for the yt-dlp backed fetcher
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub ytdlp_path: PathBuf,
    pub output_template: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: PathBuf::from("yt-dlp"),
            output_template: "%(title)s.%(ext)s".to_string(),
        }
    }
}
