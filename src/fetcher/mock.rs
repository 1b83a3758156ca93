use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use super::{FetchError, MediaFetcher, MediaHandle, Result, StreamChoice};
use crate::utils::extract_video_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOutcome {
    Success,
    Unavailable,
    Offline,
    Broken,
    NoStream,
}

/// In-memory fetcher that records which stream variant it was asked for.
pub struct MockFetcher {
    outcome: MockOutcome,
    stream_requests: Mutex<Vec<bool>>,
}

impl MockFetcher {
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            stream_requests: Mutex::new(Vec::new()),
        }
    }

    /// `audio_only` flags passed to `select_stream`, in call order.
    pub fn stream_requests(&self) -> Vec<bool> {
        self.stream_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaFetcher for MockFetcher {
    fn resolve(&self, url: &str) -> Result<MediaHandle> {
        let video_id =
            extract_video_id(url).ok_or_else(|| FetchError::InvalidUrl(url.to_string()))?;
        let watch_url = Url::parse(&format!("https://www.youtube.com/watch?v={video_id}"))
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        Ok(MediaHandle {
            video_id,
            watch_url,
        })
    }

    async fn select_stream(&self, _handle: &MediaHandle, audio_only: bool) -> Result<StreamChoice> {
        self.stream_requests.lock().unwrap().push(audio_only);

        match self.outcome {
            MockOutcome::Unavailable => Err(FetchError::Unavailable("private video".into())),
            MockOutcome::NoStream => Err(FetchError::NoMatchingStream("audio-only")),
            _ => Ok(StreamChoice {
                format_id: if audio_only { "140" } else { "22" }.to_string(),
                ext: if audio_only { "m4a" } else { "mp4" }.to_string(),
                audio_only,
                label: "mock".to_string(),
            }),
        }
    }

    async fn transfer(
        &self,
        handle: &MediaHandle,
        stream: &StreamChoice,
        destination: &Path,
    ) -> Result<PathBuf> {
        match self.outcome {
            MockOutcome::Offline => Err(FetchError::Network("connection refused".into())),
            MockOutcome::Broken => Err(FetchError::Process {
                status: "exit status: 1".into(),
                stderr: "ERROR: unexpected extractor failure".into(),
            }),
            _ => Ok(destination.join(format!("{}.{}", handle.video_id, stream.ext))),
        }
    }
}
