use std::path::PathBuf;
use std::sync::Arc;

use futures::{stream::BoxStream, StreamExt};

use crate::{
    domain::{DownloadRequest, FailureKind},
    fetcher::{FetchError, MediaFetcher, MediaHandle},
};

/// What the background task reports back to the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    /// The URL was recognised and the transfer is starting.
    Downloading,
    /// Terminal outcome, emitted exactly once per request.
    Finished(Result<PathBuf, FailureKind>),
}

#[derive(Clone)]
pub struct DownloadCoordinator {
    fetcher: Arc<dyn MediaFetcher>,
}

impl DownloadCoordinator {
    pub fn new(fetcher: Arc<dyn MediaFetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn choose_folder() -> Option<PathBuf> {
        rfd::AsyncFileDialog::new()
            .set_title("Save To")
            .pick_folder()
            .await
            .map(|handle| handle.path().to_path_buf())
    }

    /// Drive one request through resolve, stream selection and transfer.
    ///
    /// Yields `Downloading` once the URL is recognised, then a single
    /// `Finished`. Every fetcher error is folded into a [`FailureKind`] here.
    pub fn fetch_stream(&self, request: DownloadRequest) -> BoxStream<'static, FetchEvent> {
        futures::stream::unfold(
            FetchRuntimeState::Start {
                fetcher: self.fetcher.clone(),
                request,
            },
            |state| async move {
                match state {
                    FetchRuntimeState::Start { fetcher, request } => {
                        match fetcher.resolve(&request.url) {
                            Ok(handle) => {
                                log::info!("Resolved {} to {}", request.url, handle.watch_url);
                                Some((
                                    FetchEvent::Downloading,
                                    FetchRuntimeState::Resolved {
                                        fetcher,
                                        handle,
                                        request,
                                    },
                                ))
                            }
                            Err(e) => Some((finish(Err(e)), FetchRuntimeState::Finished)),
                        }
                    }
                    FetchRuntimeState::Resolved {
                        fetcher,
                        handle,
                        request,
                    } => {
                        let result = fetch(fetcher.as_ref(), &handle, &request).await;
                        Some((finish(result), FetchRuntimeState::Finished))
                    }
                    FetchRuntimeState::Finished => None,
                }
            },
        )
        .boxed()
    }
}

enum FetchRuntimeState {
    Start {
        fetcher: Arc<dyn MediaFetcher>,
        request: DownloadRequest,
    },
    Resolved {
        fetcher: Arc<dyn MediaFetcher>,
        handle: MediaHandle,
        request: DownloadRequest,
    },
    Finished,
}

async fn fetch(
    fetcher: &dyn MediaFetcher,
    handle: &MediaHandle,
    request: &DownloadRequest,
) -> Result<PathBuf, FetchError> {
    let stream = fetcher
        .select_stream(handle, request.mode.is_audio_only())
        .await?;
    log::info!(
        "Selected format {} ({}{}) for {}",
        stream.format_id,
        stream.label,
        if stream.audio_only { ", audio only" } else { "" },
        handle.video_id
    );

    fetcher
        .transfer(handle, &stream, &request.destination)
        .await
}

fn finish(result: Result<PathBuf, FetchError>) -> FetchEvent {
    match result {
        Ok(path) => {
            log::info!("Saved {}", path.display());
            FetchEvent::Finished(Ok(path))
        }
        Err(e) => {
            let kind = classify(&e);
            log::warn!("Download failed as '{}': {}", kind, e);
            FetchEvent::Finished(Err(kind))
        }
    }
}

pub fn classify(error: &FetchError) -> FailureKind {
    match error {
        FetchError::InvalidUrl(_) => FailureKind::InvalidUrl,
        FetchError::Unavailable(_) => FailureKind::ContentUnavailable,
        FetchError::Network(_) => FailureKind::Connectivity,
        _ => FailureKind::Unclassified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DownloadMode;
    use crate::fetcher::mock::{MockFetcher, MockOutcome};

    fn request(url: &str, mode: DownloadMode) -> DownloadRequest {
        DownloadRequest {
            url: url.to_string(),
            destination: PathBuf::from("/tmp/videos/"),
            mode,
        }
    }

    async fn run(fetcher: Arc<MockFetcher>, request: DownloadRequest) -> Vec<FetchEvent> {
        DownloadCoordinator::new(fetcher)
            .fetch_stream(request)
            .collect()
            .await
    }

    const URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    #[tokio::test]
    async fn test_invalid_url_skips_downloading() {
        let fetcher = Arc::new(MockFetcher::new(MockOutcome::Success));
        let events = run(fetcher.clone(), request("not a url", DownloadMode::VideoWithAudio)).await;

        assert_eq!(events, vec![FetchEvent::Finished(Err(FailureKind::InvalidUrl))]);
        assert!(fetcher.stream_requests().is_empty());
    }

    #[tokio::test]
    async fn test_successful_video_download() {
        let fetcher = Arc::new(MockFetcher::new(MockOutcome::Success));
        let events = run(fetcher.clone(), request(URL, DownloadMode::VideoWithAudio)).await;

        assert_eq!(
            events,
            vec![
                FetchEvent::Downloading,
                FetchEvent::Finished(Ok(PathBuf::from("/tmp/videos/dQw4w9WgXcQ.mp4"))),
            ]
        );
        assert_eq!(fetcher.stream_requests(), vec![false]);
    }

    #[tokio::test]
    async fn test_audio_only_requests_audio_stream() {
        let fetcher = Arc::new(MockFetcher::new(MockOutcome::Success));
        let events = run(fetcher.clone(), request(URL, DownloadMode::AudioOnly)).await;

        assert_eq!(fetcher.stream_requests(), vec![true]);
        assert_eq!(
            events.last(),
            Some(&FetchEvent::Finished(Ok(PathBuf::from(
                "/tmp/videos/dQw4w9WgXcQ.m4a"
            ))))
        );
    }

    #[tokio::test]
    async fn test_failures_map_to_fixed_kinds() {
        let cases = [
            (MockOutcome::Unavailable, FailureKind::ContentUnavailable),
            (MockOutcome::Offline, FailureKind::Connectivity),
            (MockOutcome::Broken, FailureKind::Unclassified),
            (MockOutcome::NoStream, FailureKind::Unclassified),
        ];

        for (outcome, expected) in cases {
            let fetcher = Arc::new(MockFetcher::new(outcome));
            let events = run(fetcher, request(URL, DownloadMode::VideoWithAudio)).await;
            assert_eq!(
                events,
                vec![FetchEvent::Downloading, FetchEvent::Finished(Err(expected))],
                "outcome {:?}",
                outcome
            );
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            classify(&FetchError::InvalidUrl("x".into())),
            FailureKind::InvalidUrl
        );
        assert_eq!(
            classify(&FetchError::Unavailable("private".into())),
            FailureKind::ContentUnavailable
        );
        assert_eq!(
            classify(&FetchError::Network("timed out".into())),
            FailureKind::Connectivity
        );
        assert_eq!(
            classify(&FetchError::Process {
                status: "exit status: 1".into(),
                stderr: "boom".into()
            }),
            FailureKind::Unclassified
        );
        assert_eq!(
            classify(&FetchError::Io(std::io::Error::other("missing"))),
            FailureKind::Unclassified
        );
    }
}
