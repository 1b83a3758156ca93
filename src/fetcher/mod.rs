pub mod client;
#[cfg(test)]
pub mod mock;
pub mod models;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

pub use client::{FetchError, Result, YtDlpFetcher};
pub use models::{FetcherConfig, MediaHandle, StreamChoice};

/// Boundary to whatever actually talks to the video host.
///
/// The three steps mirror how a download is driven: recognise the URL, pick a
/// stream, then move the bytes to disk.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Recognise `url` as a video. Must not touch the network.
    fn resolve(&self, url: &str) -> Result<MediaHandle>;

    /// Pick the audio-only stream, or the highest resolution stream carrying
    /// both video and audio.
    async fn select_stream(&self, handle: &MediaHandle, audio_only: bool) -> Result<StreamChoice>;

    /// Save `stream` into `destination`, returning the written file.
    async fn transfer(
        &self,
        handle: &MediaHandle,
        stream: &StreamChoice,
        destination: &Path,
    ) -> Result<PathBuf>;
}
