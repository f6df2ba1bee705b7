use std::fmt;
use std::io;

use catalog_core::{ErrorReason, Page, RecordDetail, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageFetched {
        request_id: RequestId,
        result: Result<Page, FetchError>,
    },
    DetailFetched {
        request_id: RequestId,
        result: Result<RecordDetail, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Transport failures may succeed on retry; upstream rejections will not.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.kind,
            FailureKind::Timeout
                | FailureKind::Network
                | FailureKind::HttpStatus(_)
                | FailureKind::Decode
        )
    }
}

impl From<FetchError> for ErrorReason {
    fn from(err: FetchError) -> Self {
        if err.is_transport() {
            ErrorReason::transport(err.to_string())
        } else {
            ErrorReason::upstream(err.message)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    /// Detail lookup asked for a blank id; never reaches the network.
    InvalidIdentifier,
    HttpStatus(u16),
    Timeout,
    Network,
    /// Response body did not match the upstream contract.
    Decode,
    /// Upstream answered but reported a domain error.
    Upstream,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidIdentifier => write!(f, "invalid identifier"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Upstream => write!(f, "upstream error"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
}
