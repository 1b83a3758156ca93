use thiserror::Error;

/// The four outcomes a failed download can be reported as.
///
/// `Display` yields the exact text shown in the status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("Invalid URL")]
    InvalidUrl,

    #[error("Video Unavailable")]
    ContentUnavailable,

    #[error("Connection Error")]
    Connectivity,

    #[error("An Error Occurred")]
    Unclassified,
}
