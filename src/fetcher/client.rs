use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use url::Url;

use super::models::{FetcherConfig, FormatInfo, MediaHandle, StreamChoice, VideoInfo};
use super::MediaFetcher;
use crate::utils::extract_video_id;

/// Keeps a console window from flashing up for every yt-dlp call.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x08000000;

const WATCH_URL: &str = "https://www.youtube.com/watch";

/// `availability` values yt-dlp reports for videos we cannot fetch anonymously
const RESTRICTED_AVAILABILITY: &[&str] = &["private", "premium_only", "subscriber_only", "needs_auth"];

/// Failures about the chosen format, not the video. Checked before the
/// markers below so "Requested format is not available" stays unclassified.
const FORMAT_MARKERS: &[&str] = &["requested format", "no video formats found"];

const UNAVAILABLE_MARKERS: &[&str] = &[
    "video unavailable",
    "private video",
    "this video is private",
    "has been removed",
    "sign in to confirm",
    "members-only",
    "not available",
    "copyright",
    "account associated with this video has been terminated",
];

const NETWORK_MARKERS: &[&str] = &[
    "unable to download webpage",
    "unable to download api page",
    "urlopen error",
    "connection",
    "timed out",
    "name resolution",
    "name or service not known",
    "getaddrinfo",
    "failed to resolve",
    "network is unreachable",
];

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Unrecognised video URL: {0}")]
    InvalidUrl(String),

    #[error("Video unavailable: {0}")]
    Unavailable(String),

    #[error("Connection failed: {0}")]
    Network(String),

    #[error("No {0} stream available")]
    NoMatchingStream(&'static str),

    #[error("yt-dlp exited with {status}: {stderr}")]
    Process { status: String, stderr: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// [`MediaFetcher`] that shells out to the `yt-dlp` executable.
#[derive(Clone)]
pub struct YtDlpFetcher {
    config: FetcherConfig,
}

impl YtDlpFetcher {
    pub fn new(config: FetcherConfig) -> Self {
        Self { config }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.config.ytdlp_path);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(windows)]
        cmd.creation_flags(CREATE_NO_WINDOW);
        cmd
    }

    /// Run yt-dlp to completion and hand back its stdout.
    async fn run(&self, args: &[&str]) -> Result<String> {
        log::debug!(
            "Running {} {}",
            self.config.ytdlp_path.display(),
            args.join(" ")
        );

        let output = self.command().args(args).output().await.map_err(|e| {
            log::error!(
                "Could not start {}: {}",
                self.config.ytdlp_path.display(),
                e
            );
            e
        })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(classify_stderr(output.status.to_string(), stderr))
        }
    }
}

#[async_trait]
impl MediaFetcher for YtDlpFetcher {
    fn resolve(&self, url: &str) -> Result<MediaHandle> {
        let video_id =
            extract_video_id(url).ok_or_else(|| FetchError::InvalidUrl(url.to_string()))?;
        let watch_url = Url::parse_with_params(WATCH_URL, &[("v", video_id.as_str())])
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        Ok(MediaHandle {
            video_id,
            watch_url,
        })
    }

    async fn select_stream(&self, handle: &MediaHandle, audio_only: bool) -> Result<StreamChoice> {
        let json = self
            .run(&[
                "--dump-single-json",
                "--no-playlist",
                "--no-warnings",
                handle.watch_url.as_str(),
            ])
            .await?;
        let info: VideoInfo = serde_json::from_str(&json)?;
        check_availability(&info)?;

        log::info!(
            "'{}' ({}) offers {} formats",
            info.title,
            info.id,
            info.formats.len()
        );

        if audio_only {
            pick_audio_only(&info.formats).ok_or(FetchError::NoMatchingStream("audio-only"))
        } else {
            pick_highest_resolution(&info.formats)
                .ok_or(FetchError::NoMatchingStream("video+audio"))
        }
    }

    async fn transfer(
        &self,
        handle: &MediaHandle,
        stream: &StreamChoice,
        destination: &Path,
    ) -> Result<PathBuf> {
        let destination_arg = destination.to_string_lossy();
        let stdout = self
            .run(&[
                "-f",
                stream.format_id.as_str(),
                "-P",
                destination_arg.as_ref(),
                "-o",
                self.config.output_template.as_str(),
                "--no-playlist",
                "--no-progress",
                "--no-warnings",
                "--print",
                "after_move:filepath",
                "--no-simulate",
                handle.watch_url.as_str(),
            ])
            .await?;

        // yt-dlp prints the final path last; older builds may print nothing.
        let saved = stdout
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| destination.to_path_buf());

        Ok(saved)
    }
}

fn check_availability(info: &VideoInfo) -> Result<()> {
    match info.availability.as_deref() {
        Some(status) if RESTRICTED_AVAILABILITY.contains(&status) => {
            Err(FetchError::Unavailable(format!("{} is {}", info.id, status)))
        }
        _ => Ok(()),
    }
}

/// Map a failed yt-dlp run onto the error kinds the UI distinguishes.
/// Format problems win over unavailability, which wins over network trouble.
pub(crate) fn classify_stderr(status: String, stderr: String) -> FetchError {
    let lower = stderr.to_lowercase();

    if FORMAT_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return FetchError::Process { status, stderr };
    }

    if UNAVAILABLE_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return FetchError::Unavailable(last_line(&stderr));
    }

    if NETWORK_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return FetchError::Network(last_line(&stderr));
    }

    FetchError::Process { status, stderr }
}

fn last_line(text: &str) -> String {
    text.lines()
        .rfind(|line| !line.trim().is_empty())
        .unwrap_or(text)
        .trim()
        .to_string()
}

fn rank_cmp(a: (f64, f64), b: (f64, f64)) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Best of `candidates`, restricted to `preferred_ext` when any match it.
fn best_of<'a>(
    candidates: Vec<&'a FormatInfo>,
    preferred_ext: &str,
    rank: impl Fn(&FormatInfo) -> (f64, f64),
) -> Option<&'a FormatInfo> {
    let has_preferred = candidates.iter().any(|f| f.ext == preferred_ext);
    candidates
        .into_iter()
        .filter(|f| !has_preferred || f.ext == preferred_ext)
        .max_by(|a, b| rank_cmp(rank(*a), rank(*b)))
}

/// Highest bitrate audio-only format, m4a first.
pub fn pick_audio_only(formats: &[FormatInfo]) -> Option<StreamChoice> {
    let candidates = formats.iter().filter(|f| f.is_audio_only()).collect();

    best_of(candidates, "m4a", |f| {
        (f.abr.or(f.tbr).unwrap_or(0.0), f.tbr.unwrap_or(0.0))
    })
    .map(|f| StreamChoice {
        format_id: f.format_id.clone(),
        ext: f.ext.clone(),
        audio_only: true,
        label: format!("{:.0}kbps {}", f.abr.or(f.tbr).unwrap_or(0.0), f.ext),
    })
}

/// Tallest format carrying both video and audio, mp4 first.
pub fn pick_highest_resolution(formats: &[FormatInfo]) -> Option<StreamChoice> {
    let candidates = formats.iter().filter(|f| f.is_progressive()).collect();

    best_of(candidates, "mp4", |f| {
        (f64::from(f.height.unwrap_or(0)), f.tbr.unwrap_or(0.0))
    })
    .map(|f| StreamChoice {
        format_id: f.format_id.clone(),
        ext: f.ext.clone(),
        audio_only: false,
        label: format!("{}p {}", f.height.unwrap_or(0), f.ext),
    })
}
