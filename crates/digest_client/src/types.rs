use std::fmt;

use serde::Deserialize;

/// Response wrapper used by every endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub(crate) success: bool,
    pub(crate) data: Option<T>,
    pub(crate) error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewspaperSummary {
    pub filename: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub bv_id: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub news_count: Option<u32>,
    #[serde(default)]
    pub organize_time: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_count: u64,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewspaperPage {
    #[serde(default)]
    pub newspapers: Vec<NewspaperSummary>,
    pub pagination: Pagination,
}

/// Detail payload. `html_content` is pre-rendered markup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NewspaperDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub bv_id: Option<String>,
    #[serde(default)]
    pub organize_time: Option<String>,
    #[serde(default)]
    pub news_count: Option<u32>,
    #[serde(default)]
    pub html_content: Option<String>,
}

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    ListCompleted {
        request_id: RequestId,
        result: Result<NewspaperPage, ApiError>,
    },
    DetailCompleted {
        request_id: RequestId,
        filename: String,
        result: Result<NewspaperDetail, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
    Decode,
    /// The server answered with `success: false`.
    Rejected,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Rejected => write!(f, "rejected by server"),
        }
    }
}
