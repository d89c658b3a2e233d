//! Digest viewer core: pure state machine, view-model helpers and markup.
mod effect;
mod markup;
mod msg;
mod pagination;
mod relative_time;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use markup::{escape_html, Html, TrustedHtml};
pub use msg::{Key, Msg};
pub use pagination::{pagination_window, PageItem};
pub use relative_time::{relative_time, UNKNOWN_TIME};
pub use state::{
    AppState, DigestDetail, DigestPage, DigestSummary, PageInfo, PageState, RequestId, Toast,
    ToastId, ToastKind, ViewRegion, PAGE_SIZE, TOAST_DURATION,
};
pub use update::update;
pub use view_model::{
    AppViewModel, CardView, DetailView, PaginationView, OVERVIEW_EXCERPT_CHARS, UNKNOWN_BV_ID,
    UNKNOWN_DATE, UNTITLED,
};
