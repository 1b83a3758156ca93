use std::fmt;
use std::path::PathBuf;

use super::FailureKind;

/// Which stream variant the user wants saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadMode {
    #[default]
    VideoWithAudio,
    AudioOnly,
}

impl DownloadMode {
    pub fn is_audio_only(self) -> bool {
        matches!(self, DownloadMode::AudioOnly)
    }
}

impl fmt::Display for DownloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadMode::VideoWithAudio => write!(f, "video+audio"),
            DownloadMode::AudioOnly => write!(f, "audio only"),
        }
    }
}

/// Snapshot of the form taken when the Download button is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub destination: PathBuf,
    pub mode: DownloadMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadPhase {
    Idle,
    Busy,
}

/// Status surfaced in the message label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Downloading,
    Completed,
    Failed(FailureKind),
}

impl FetchStatus {
    pub fn message(self) -> String {
        match self {
            FetchStatus::Downloading => "Downloading…".to_string(),
            FetchStatus::Completed => "Completed!".to_string(),
            FetchStatus::Failed(kind) => kind.to_string(),
        }
    }
}
