use digest_core::{AppViewModel, CardView, DetailView, Html, PageItem, ToastKind, ViewRegion};

/// HTML fragments for every dynamic region of the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedView {
    pub region: ViewRegion,
    pub loading: bool,
    pub show_cards: bool,
    pub show_pagination: bool,
    pub total: Html,
    pub cards: Html,
    pub pagination: Html,
    pub detail: Html,
    pub toasts: Html,
}

impl RenderedView {
    /// Script that pushes this view into the page shell.
    #[cfg(any(feature = "webview", test))]
    pub fn to_script(&self) -> String {
        let payload = serde_json::json!({
            "region": region_name(self.region),
            "loading": self.loading,
            "showCards": self.show_cards,
            "showPagination": self.show_pagination,
            "total": self.total.as_str(),
            "cards": self.cards.as_str(),
            "pagination": self.pagination.as_str(),
            "detail": self.detail.as_str(),
            "toasts": self.toasts.as_str(),
        });
        format!("window.digestViewer.apply({payload});")
    }
}

pub fn region_name(region: ViewRegion) -> &'static str {
    match region {
        ViewRegion::List => "list",
        ViewRegion::Detail => "detail",
    }
}

pub fn render(view: &AppViewModel) -> RenderedView {
    RenderedView {
        region: view.region,
        loading: view.loading,
        show_cards: view.show_cards,
        show_pagination: view.show_pagination,
        total: total(view.total_count),
        cards: cards(&view.cards),
        pagination: pagination(view),
        detail: view.detail.as_ref().map(detail).unwrap_or_default(),
        toasts: toasts(view),
    }
}

fn total(count: u64) -> Html {
    let mut html = Html::new();
    html.text(&format!("{count} digests in total"));
    html
}

fn cards(cards: &[CardView]) -> Html {
    let mut html = Html::new();
    if cards.is_empty() {
        html.open("div", &[("class", "empty-state")])
            .element("p", &[], "No digests yet")
            .close("div");
        return html;
    }

    for card in cards {
        html.open(
            "div",
            &[
                ("class", "newspaper-card"),
                ("data-action", "open"),
                ("data-filename", card.filename.as_str()),
            ],
        );
        html.open("div", &[("class", "newspaper-header")])
            .element("h3", &[("class", "newspaper-title")], &card.title)
            .open("div", &[("class", "newspaper-meta")])
            .element("span", &[("class", "meta-item meta-date")], &card.publish_date)
            .element("span", &[("class", "meta-item meta-video")], &card.bv_id)
            .close("div")
            .close("div");
        html.element(
            "div",
            &[("class", "newspaper-overview")],
            &card.overview_excerpt,
        );
        html.open("div", &[("class", "newspaper-stats")])
            .element(
                "span",
                &[("class", "stats-count")],
                &format!("{} items", card.news_count),
            )
            .element("span", &[("class", "stats-time")], &card.organized)
            .close("div");
        html.close("div");
    }
    html
}

fn pagination(view: &AppViewModel) -> Html {
    let mut html = Html::new();
    let Some(pagination) = &view.pagination else {
        return html;
    };

    nav_button(&mut html, "prev", "Previous page", "‹", pagination.prev_enabled);

    for item in &pagination.items {
        match item {
            PageItem::Page { number, current } => {
                let number = number.to_string();
                let mut attrs = vec![("data-action", "page"), ("data-page", number.as_str())];
                if *current {
                    attrs.push(("class", "active"));
                }
                html.element("button", &attrs, &number);
            }
            PageItem::Ellipsis => {
                html.element("span", &[("class", "ellipsis")], "...");
            }
        }
    }

    nav_button(&mut html, "next", "Next page", "›", pagination.next_enabled);

    html.element(
        "div",
        &[("class", "pagination-info")],
        &format!(
            "Page {} / {}",
            pagination.current_page, pagination.total_pages
        ),
    );
    html
}

fn nav_button(html: &mut Html, action: &str, title: &str, label: &str, enabled: bool) {
    let mut attrs = vec![("data-action", action), ("title", title)];
    if !enabled {
        attrs.push(("disabled", ""));
    }
    html.element("button", &attrs, label);
}

fn detail(detail: &DetailView) -> Html {
    let mut html = Html::new();
    html.element("h1", &[], &detail.title);

    html.open("div", &[("class", "detail-meta")]);
    meta_item(&mut html, "Published", |html| {
        html.text(&detail.publish_date);
    });
    meta_item(&mut html, "Video", |html| {
        match (&detail.bv_id, &detail.bv_link) {
            (Some(bv_id), Some(link)) => {
                html.element(
                    "a",
                    &[
                        ("class", "bv-link"),
                        ("href", link.as_str()),
                        ("target", "_blank"),
                        ("rel", "noopener"),
                    ],
                    bv_id,
                );
            }
            _ => {
                html.text(digest_core::UNKNOWN_BV_ID);
            }
        }
    });
    meta_item(&mut html, "Organized", |html| {
        html.text(&detail.organized);
    });
    meta_item(&mut html, "Items", |html| {
        html.text(&detail.news_count.to_string());
    });
    html.close("div");

    html.open("div", &[("class", "detail-content-body")]);
    match &detail.body {
        Some(body) => {
            html.trusted(body);
        }
        None => {
            html.element("p", &[], "Content unavailable");
        }
    }
    html.close("div");
    html
}

fn meta_item(html: &mut Html, label: &str, value: impl FnOnce(&mut Html)) {
    html.open("div", &[("class", "detail-meta-item")])
        .element("strong", &[], &format!("{label}: "))
        .open("span", &[]);
    value(html);
    html.close("span").close("div");
}

fn toasts(view: &AppViewModel) -> Html {
    let mut html = Html::new();
    for toast in &view.toasts {
        let class = match toast.kind {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        };
        let id = toast.id.to_string();
        html.element("div", &[("class", class), ("data-toast", id.as_str())], &toast.message);
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use digest_core::{PaginationView, Toast, TrustedHtml};
    use pretty_assertions::assert_eq;

    fn card(title: &str) -> CardView {
        CardView {
            filename: "a'b.json".to_string(),
            title: title.to_string(),
            publish_date: "2024-06-14".to_string(),
            bv_id: "BV1abc".to_string(),
            overview_excerpt: "overview".to_string(),
            news_count: 4,
            organized: "yesterday".to_string(),
        }
    }

    #[test]
    fn card_text_is_escaped() {
        let html = cards(&[card("<b>x</b>")]).into_string();
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(!html.contains("<b>x</b>"));
        assert!(html.contains("data-filename=\"a&#39;b.json\""));
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn empty_list_shows_placeholder() {
        assert!(cards(&[]).as_str().contains("No digests yet"));
    }

    #[test]
    fn pagination_marks_current_and_disabled_controls() {
        let view = AppViewModel {
            pagination: Some(PaginationView {
                items: digest_core::pagination_window(1, 20),
                current_page: 1,
                total_pages: 20,
                prev_enabled: false,
                next_enabled: true,
            }),
            ..AppViewModel::default()
        };

        let html = pagination(&view).into_string();
        assert!(html.starts_with(
            "<button data-action=\"prev\" title=\"Previous page\" disabled=\"\">‹</button>"
        ));
        assert!(html.contains(
            "<button data-action=\"page\" data-page=\"1\" class=\"active\">1</button>"
        ));
        assert!(html.contains("<span class=\"ellipsis\">...</span>"));
        assert!(html.contains("<button data-action=\"page\" data-page=\"20\">20</button>"));
        assert!(html.contains("<button data-action=\"next\" title=\"Next page\">›</button>"));
        assert!(html.ends_with("<div class=\"pagination-info\">Page 1 / 20</div>"));
    }

    #[test]
    fn no_pagination_renders_nothing() {
        assert_eq!(pagination(&AppViewModel::default()).as_str(), "");
    }

    #[test]
    fn detail_body_is_trusted_but_fields_are_escaped() {
        let view = DetailView {
            filename: "x.json".to_string(),
            title: "A <script>".to_string(),
            publish_date: "2024-06-14".to_string(),
            bv_id: Some("BV1\"x".to_string()),
            bv_link: Some("https://www.bilibili.com/video/BV1\"x".to_string()),
            organized: "just now".to_string(),
            news_count: 2,
            body: Some(TrustedHtml::from_trusted_source("<h2>Chips</h2>")),
        };

        let html = detail(&view).into_string();
        assert!(html.starts_with("<h1>A &lt;script&gt;</h1>"));
        assert!(html.contains("href=\"https://www.bilibili.com/video/BV1&quot;x\""));
        assert!(html.contains("<div class=\"detail-content-body\"><h2>Chips</h2></div>"));
    }

    #[test]
    fn missing_body_shows_fallback() {
        let view = DetailView {
            filename: "x.json".to_string(),
            title: "T".to_string(),
            publish_date: "d".to_string(),
            bv_id: None,
            bv_link: None,
            organized: "o".to_string(),
            news_count: 0,
            body: None,
        };

        let html = detail(&view).into_string();
        assert!(html.contains("Content unavailable"));
        assert!(html.contains(digest_core::UNKNOWN_BV_ID));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn script_payload_is_valid_json() {
        let view = AppViewModel {
            region: ViewRegion::Detail,
            toasts: vec![Toast {
                id: 3,
                kind: ToastKind::Error,
                message: "Failed to load details: \"boom\"".to_string(),
            }],
            ..AppViewModel::default()
        };

        let script = render(&view).to_script();
        let payload = script
            .strip_prefix("window.digestViewer.apply(")
            .and_then(|rest| rest.strip_suffix(");"))
            .expect("script wrapper");
        let value: serde_json::Value = serde_json::from_str(payload).unwrap();
        assert_eq!(value["region"], "detail");
        assert_eq!(
            value["toasts"],
            "<div class=\"toast toast-error\" data-toast=\"3\">Failed to load details: &quot;boom&quot;</div>"
        );
    }
}
