//! Digest client: REST API access and background request execution.
mod api;
mod handle;
mod types;

pub use api::{ApiSettings, NewspaperApi, ReqwestApi, REJECTED_FALLBACK};
pub use handle::{ChannelEventSink, ClientHandle, EventSink};
pub use types::{
    ApiError, ClientEvent, FailureKind, NewspaperDetail, NewspaperPage, NewspaperSummary,
    Pagination, RequestId,
};
