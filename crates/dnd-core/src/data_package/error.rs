use std::time::Duration;

use thiserror::Error;

use crate::data_package::FormatId;
use crate::ports::NativeHostError;

/// Errors raised while building a data package or fetching its content.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("data items are only provided on dragenter, none were received")]
    MissingDataItems,

    #[error("format {0} is not available in this data package")]
    FormatNotAvailable(FormatId),

    #[error("content fetch was cancelled")]
    Cancelled,

    #[error("content fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("uri list does not contain any uri")]
    EmptyUriList,

    #[error("invalid uri: {0}")]
    InvalidUri(#[from] url::ParseError),

    #[error("failed to decode native storage items: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("storage item {0} is not a file")]
    NotAFile(String),

    #[error("expected {expected} storage item(s), native layer returned {actual}")]
    UnexpectedItemCount { expected: usize, actual: usize },

    #[error(transparent)]
    Native(#[from] NativeHostError),
}
