pub mod error;
pub mod model;

pub use error::FailureKind;
pub use model::{DownloadMode, DownloadPhase, DownloadRequest, FetchStatus};
