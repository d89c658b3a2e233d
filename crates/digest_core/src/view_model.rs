use chrono::{DateTime, Local};

use crate::markup::TrustedHtml;
use crate::pagination::{pagination_window, PageItem};
use crate::relative_time::{relative_time, UNKNOWN_TIME};
use crate::{DigestDetail, DigestSummary, Toast, ViewRegion};

/// Overview characters shown on a card before it is cut.
pub const OVERVIEW_EXCERPT_CHARS: usize = 150;
pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_DATE: &str = "unknown date";
pub const UNKNOWN_BV_ID: &str = "unknown BV id";
const VIDEO_BASE_URL: &str = "https://www.bilibili.com/video/";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub region: ViewRegion,
    pub loading: bool,
    pub show_cards: bool,
    pub show_pagination: bool,
    pub total_count: u64,
    pub cards: Vec<CardView>,
    pub pagination: Option<PaginationView>,
    pub detail: Option<DetailView>,
    pub toasts: Vec<Toast>,
    pub dirty: bool,
}

/// Card fields as plain text; escaping happens when they are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub filename: String,
    pub title: String,
    pub publish_date: String,
    pub bv_id: String,
    pub overview_excerpt: String,
    pub news_count: u32,
    pub organized: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub items: Vec<PageItem>,
    pub current_page: u32,
    pub total_pages: u32,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub filename: String,
    pub title: String,
    pub publish_date: String,
    pub bv_id: Option<String>,
    pub bv_link: Option<String>,
    pub organized: String,
    pub news_count: u32,
    pub body: Option<TrustedHtml>,
}

pub(crate) fn card_view(item: &DigestSummary, now: DateTime<Local>) -> CardView {
    CardView {
        filename: item.filename.clone(),
        title: non_empty_or(item.title.as_deref(), UNTITLED),
        publish_date: non_empty_or(item.publish_date.as_deref(), UNKNOWN_DATE),
        bv_id: non_empty_or(item.bv_id.as_deref(), UNKNOWN_BV_ID),
        overview_excerpt: excerpt(item.overview.as_deref().unwrap_or_default()),
        news_count: item.news_count.unwrap_or(0),
        organized: organized(item.organize_time.as_deref(), now),
    }
}

pub(crate) fn detail_view(filename: &str, detail: &DigestDetail, now: DateTime<Local>) -> DetailView {
    let bv_id = detail
        .bv_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToOwned::to_owned);
    DetailView {
        filename: filename.to_string(),
        title: non_empty_or(detail.title.as_deref(), UNTITLED),
        publish_date: non_empty_or(detail.publish_date.as_deref(), UNKNOWN_DATE),
        bv_link: bv_id.as_deref().map(|id| format!("{VIDEO_BASE_URL}{id}")),
        bv_id,
        organized: organized(detail.organize_time.as_deref(), now),
        news_count: detail.news_count.unwrap_or(0),
        body: detail
            .html_content
            .clone()
            .filter(|content| !content.is_empty()),
    }
}

pub(crate) fn pagination_view(
    current_page: u32,
    total_pages: u32,
    has_prev: bool,
    has_next: bool,
) -> PaginationView {
    PaginationView {
        items: pagination_window(current_page, total_pages),
        current_page,
        total_pages,
        prev_enabled: has_prev,
        next_enabled: has_next,
    }
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}

fn organized(raw: Option<&str>, now: DateTime<Local>) -> String {
    match raw {
        Some(raw) => relative_time(raw, now),
        None => UNKNOWN_TIME.to_string(),
    }
}

fn excerpt(overview: &str) -> String {
    let overview = overview.trim();
    let mut chars = overview.char_indices();
    match chars.nth(OVERVIEW_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &overview[..cut]),
        None => overview.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_keeps_short_text() {
        assert_eq!(excerpt("  short overview "), "short overview");
    }

    #[test]
    fn excerpt_cuts_on_char_boundary() {
        let long = "早".repeat(OVERVIEW_EXCERPT_CHARS + 5);
        let cut = excerpt(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), OVERVIEW_EXCERPT_CHARS + 3);
    }

    #[test]
    fn blank_fields_fall_back() {
        assert_eq!(non_empty_or(Some("   "), UNTITLED), UNTITLED);
        assert_eq!(non_empty_or(None, UNKNOWN_DATE), UNKNOWN_DATE);
        assert_eq!(non_empty_or(Some(" Morning "), UNTITLED), "Morning");
    }
}
