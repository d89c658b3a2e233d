use std::time::Duration;

use chrono::{DateTime, Local};
use digest_logging::digest_warn;

use crate::markup::TrustedHtml;
use crate::view_model::{card_view, detail_view, pagination_view, AppViewModel};

pub type RequestId = u64;
pub type ToastId = u64;

/// Digests per list page.
pub const PAGE_SIZE: u32 = 10;
/// How long a notification stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewRegion {
    #[default]
    List,
    Detail,
}

/// One card in the list, as delivered by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DigestSummary {
    pub filename: String,
    pub title: Option<String>,
    pub publish_date: Option<String>,
    pub bv_id: Option<String>,
    pub overview: Option<String>,
    pub news_count: Option<u32>,
    pub organize_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DigestDetail {
    pub title: Option<String>,
    pub publish_date: Option<String>,
    pub bv_id: Option<String>,
    pub organize_time: Option<String>,
    pub news_count: Option<u32>,
    pub html_content: Option<TrustedHtml>,
}

/// Pagination block reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_count: u64,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DigestPage {
    pub items: Vec<DigestSummary>,
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: PAGE_SIZE,
            total_count: 0,
            total_pages: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingList {
    pub(crate) id: RequestId,
    pub(crate) refresh: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingDetail {
    pub(crate) id: RequestId,
    pub(crate) filename: String,
    pub(crate) refresh: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    page: PageState,
    has_prev: bool,
    has_next: bool,
    items: Vec<DigestSummary>,
    region: ViewRegion,
    selection: Option<String>,
    detail: Option<DigestDetail>,
    pending_list: Option<PendingList>,
    pending_detail: Option<PendingDetail>,
    last_request_id: RequestId,
    toasts: Vec<Toast>,
    last_toast_id: ToastId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self, now: DateTime<Local>) -> AppViewModel {
        let loading = self.is_loading();
        let pagination = if self.page.total_pages > 1 {
            Some(pagination_view(
                self.page.current_page,
                self.page.total_pages,
                self.has_prev,
                self.has_next,
            ))
        } else {
            None
        };

        AppViewModel {
            region: self.region,
            loading,
            show_cards: !loading,
            show_pagination: !loading && pagination.is_some(),
            total_count: self.page.total_count,
            cards: self.items.iter().map(|item| card_view(item, now)).collect(),
            pagination,
            detail: match (&self.selection, &self.detail) {
                (Some(filename), Some(detail)) => Some(detail_view(filename, detail, now)),
                _ => None,
            },
            toasts: self.toasts.clone(),
            dirty: self.dirty,
        }
    }

    pub fn region(&self) -> ViewRegion {
        self.region
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn has_prev(&self) -> bool {
        self.has_prev
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Filename of the digest shown in the detail view.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending_list.is_some() || self.pending_detail.is_some()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn next_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }

    /// Registers a list request; any earlier one becomes stale.
    pub(crate) fn begin_list_request(&mut self, refresh: bool) -> RequestId {
        let id = self.next_request_id();
        self.pending_list = Some(PendingList { id, refresh });
        self.mark_dirty();
        id
    }

    /// Registers a detail request; any earlier one becomes stale.
    pub(crate) fn begin_detail_request(&mut self, filename: String, refresh: bool) -> RequestId {
        let id = self.next_request_id();
        self.pending_detail = Some(PendingDetail {
            id,
            filename,
            refresh,
        });
        self.mark_dirty();
        id
    }

    /// Claims the pending list request if `id` is still the latest one.
    pub(crate) fn finish_list_request(&mut self, id: RequestId) -> Option<PendingList> {
        if self.pending_list.as_ref().map(|pending| pending.id) != Some(id) {
            return None;
        }
        self.mark_dirty();
        self.pending_list.take()
    }

    /// Claims the pending detail request if `id` is still the latest one.
    pub(crate) fn finish_detail_request(&mut self, id: RequestId) -> Option<PendingDetail> {
        if self.pending_detail.as_ref().map(|pending| pending.id) != Some(id) {
            return None;
        }
        self.mark_dirty();
        self.pending_detail.take()
    }

    pub(crate) fn apply_page(&mut self, page: DigestPage) {
        let info = page.pagination;
        let upper = info.total_pages.max(1);
        let current_page = info.current_page.clamp(1, upper);
        if current_page != info.current_page {
            digest_warn!(
                "Server reported page {} of {}; clamped to {}",
                info.current_page,
                info.total_pages,
                current_page
            );
        }

        self.page = PageState {
            current_page,
            page_size: PAGE_SIZE,
            total_count: info.total_count,
            total_pages: info.total_pages,
        };
        self.has_prev = info.has_prev;
        self.has_next = info.has_next;
        self.items = page.items;
        self.mark_dirty();
    }

    pub(crate) fn open_detail(&mut self, filename: String, detail: DigestDetail) {
        self.selection = Some(filename);
        self.detail = Some(detail);
        self.region = ViewRegion::Detail;
        self.mark_dirty();
    }

    /// Switches back to the list and forgets the selection and any detail
    /// request still in flight.
    pub(crate) fn show_list(&mut self) {
        if self.region == ViewRegion::List
            && self.selection.is_none()
            && self.pending_detail.is_none()
        {
            return;
        }
        self.region = ViewRegion::List;
        self.selection = None;
        self.detail = None;
        self.pending_detail = None;
        self.mark_dirty();
    }

    pub(crate) fn push_toast(&mut self, kind: ToastKind, message: String) -> ToastId {
        self.last_toast_id += 1;
        let id = self.last_toast_id;
        self.toasts.push(Toast { id, kind, message });
        self.mark_dirty();
        id
    }

    pub(crate) fn dismiss_toast(&mut self, id: ToastId) {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        if self.toasts.len() != before {
            self.mark_dirty();
        }
    }
}
