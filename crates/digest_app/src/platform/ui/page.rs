use digest_core::Html;

use super::render::{region_name, RenderedView};

const STYLES: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI","Noto Sans",Helvetica,Arial,sans-serif;background:#f5f6f8;color:#222}
.container{max-width:960px;margin:0 auto;padding:24px}
.toolbar{display:flex;justify-content:space-between;align-items:center;margin-bottom:16px}
.toolbar button{border:1px solid #ccd;background:#fff;border-radius:6px;padding:6px 12px;cursor:pointer}
.hidden{display:none!important}
#loading{text-align:center;padding:48px;color:#888}
.newspaper-card{background:#fff;border-radius:10px;padding:18px;margin-bottom:14px;box-shadow:0 1px 3px rgba(0,0,0,.08);cursor:pointer}
.newspaper-card:hover{box-shadow:0 4px 10px rgba(0,0,0,.12)}
.newspaper-title{font-size:18px;margin-bottom:6px}
.newspaper-meta{display:flex;gap:16px;color:#777;font-size:13px}
.newspaper-overview{margin:10px 0;color:#444;line-height:1.5}
.newspaper-stats{display:flex;justify-content:space-between;color:#999;font-size:12px}
.empty-state{text-align:center;padding:48px;color:#999}
#pagination{display:flex;gap:6px;align-items:center;justify-content:center;margin:20px 0}
#pagination button{min-width:34px;padding:6px 10px;border:1px solid #ccd;background:#fff;border-radius:6px;cursor:pointer}
#pagination button.active{background:#1f6feb;border-color:#1f6feb;color:#fff}
#pagination button:disabled{opacity:.4;cursor:default}
.ellipsis{color:#999}
.pagination-info{margin-left:12px;color:#777;font-size:13px}
#detail-content h1{font-size:26px;margin-bottom:14px}
.detail-meta{display:grid;grid-template-columns:repeat(auto-fill,minmax(200px,1fr));gap:8px;background:#fff;border-radius:10px;padding:14px;margin-bottom:18px}
.detail-content-body{background:#fff;border-radius:10px;padding:20px;line-height:1.7}
#toasts{position:fixed;top:20px;right:20px;display:flex;flex-direction:column;gap:8px}
.toast{padding:10px 16px;border-radius:6px;color:#fff;animation:toast-in .3s ease-out}
.toast-success{background:#238636}
.toast-error{background:#da3633}
@keyframes toast-in{from{opacity:0;transform:translateY(-8px)}to{opacity:1;transform:none}}
"#;

/// Delegated event wiring: clicks on `[data-action]` elements and the
/// navigation keys are posted to the host as JSON actions.
const SCRIPT: &str = r#"
(function () {
  const post = (payload) => {
    if (window.ipc) window.ipc.postMessage(JSON.stringify(payload));
  };
  const byId = (id) => document.getElementById(id);
  const toggle = (id, visible) => byId(id).classList.toggle('hidden', !visible);

  document.addEventListener('click', (event) => {
    const target = event.target.closest('[data-action]');
    if (!target || target.disabled) return;
    const payload = { action: target.dataset.action };
    if (target.dataset.page) payload.page = Number(target.dataset.page);
    if (target.dataset.filename) payload.filename = target.dataset.filename;
    post(payload);
  });

  document.addEventListener('keydown', (event) => {
    if (['Escape', 'ArrowLeft', 'ArrowRight'].includes(event.key)) {
      post({ action: 'key', key: event.key });
    }
  });

  window.digestViewer = {
    apply(view) {
      toggle('list-view', view.region === 'list');
      toggle('detail-view', view.region === 'detail');
      toggle('loading', view.loading);
      toggle('newspapers-list', view.showCards);
      toggle('pagination', view.showPagination);
      byId('total-count').innerHTML = view.total;
      byId('newspapers-list').innerHTML = view.cards;
      byId('pagination').innerHTML = view.pagination;
      byId('detail-content').innerHTML = view.detail;
      byId('toasts').innerHTML = view.toasts;
    },
  };

  document.addEventListener('DOMContentLoaded', () => post({ action: 'ready' }));
})();
"#;

/// Empty page shown before the first render.
#[cfg(any(feature = "webview", test))]
pub fn shell() -> String {
    document(&RenderedView {
        loading: true,
        ..RenderedView::default()
    })
}

/// Complete HTML page with every region filled from `view`.
pub fn document(view: &RenderedView) -> String {
    let region = region_name(view.region);
    let mut html = Html::new();
    html.raw_static("<!DOCTYPE html>")
        .open("html", &[("lang", "en")])
        .open("head", &[])
        .open("meta", &[("charset", "UTF-8")])
        .element("title", &[], "AI Digest")
        .open("style", &[])
        .raw_static(STYLES)
        .close("style")
        .close("head")
        .open("body", &[])
        .open("div", &[("class", "container")]);

    html.open("div", &[("id", "loading"), ("class", visibility(view.loading))])
        .text("Loading...")
        .close("div");

    html.open(
        "div",
        &[("id", "list-view"), ("class", visibility(region == "list"))],
    )
    .open("div", &[("class", "toolbar")])
    .open("span", &[("id", "total-count")])
    .append(view.total.clone())
    .close("span")
    .element("button", &[("data-action", "refresh")], "Refresh")
    .close("div")
    .open(
        "div",
        &[("id", "newspapers-list"), ("class", visibility(view.show_cards))],
    )
    .append(view.cards.clone())
    .close("div")
    .open(
        "div",
        &[("id", "pagination"), ("class", visibility(view.show_pagination))],
    )
    .append(view.pagination.clone())
    .close("div")
    .close("div");

    html.open(
        "div",
        &[("id", "detail-view"), ("class", visibility(region == "detail"))],
    )
    .open("div", &[("class", "toolbar")])
    .element("button", &[("data-action", "back")], "← Back")
    .element("button", &[("data-action", "refresh_detail")], "Refresh")
    .close("div")
    .open("div", &[("id", "detail-content")])
    .append(view.detail.clone())
    .close("div")
    .close("div");

    html.close("div")
        .open("div", &[("id", "toasts")])
        .append(view.toasts.clone())
        .close("div")
        .open("script", &[])
        .raw_static(SCRIPT)
        .close("script")
        .close("body")
        .close("html");
    html.into_string()
}

fn visibility(visible: bool) -> &'static str {
    if visible {
        ""
    } else {
        "hidden"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_starts_in_loading_list_state() {
        let page = shell();
        assert!(page.starts_with("<!DOCTYPE html><html lang=\"en\">"));
        assert!(page.contains("<div id=\"loading\" class=\"\">Loading...</div>"));
        assert!(page.contains("<div id=\"list-view\" class=\"\">"));
        assert!(page.contains("<div id=\"detail-view\" class=\"hidden\">"));
        assert!(page.contains("window.digestViewer"));
        assert!(!page.contains("onclick"));
    }

    #[test]
    fn document_embeds_rendered_regions() {
        let mut cards = Html::new();
        cards.element("p", &[], "card");
        let view = RenderedView {
            show_cards: true,
            cards,
            ..RenderedView::default()
        };

        let page = document(&view);
        assert!(page.contains("<div id=\"newspapers-list\" class=\"\"><p>card</p></div>"));
        assert!(page.contains("<div id=\"pagination\" class=\"hidden\"></div>"));
    }
}
