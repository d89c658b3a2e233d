use std::sync::{mpsc, Arc};
use std::thread;

use digest_client::{
    ApiError, ClientEvent, ClientHandle, EventSink, FailureKind, NewspaperApi, NewspaperDetail,
    NewspaperPage,
};
use digest_core::{
    DigestDetail, DigestPage, DigestSummary, Effect, Msg, PageInfo, TrustedHtml,
};
use digest_logging::{digest_info, digest_warn};

pub(crate) struct EffectRunner {
    client: ClientHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub(crate) fn new(api: Arc<dyn NewspaperApi>, msg_tx: mpsc::Sender<Msg>) -> Self {
        let sink = Arc::new(MsgSink {
            tx: msg_tx.clone(),
        });
        Self {
            client: ClientHandle::with_api(api, sink),
            msg_tx,
        }
    }

    pub(crate) fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchList {
                    request_id,
                    page,
                    page_size,
                } => {
                    digest_info!(
                        "FetchList request_id={} page={} page_size={}",
                        request_id,
                        page,
                        page_size
                    );
                    self.client.list(request_id, page, page_size);
                }
                Effect::FetchDetail {
                    request_id,
                    filename,
                } => {
                    digest_info!("FetchDetail request_id={} filename={}", request_id, filename);
                    self.client.detail(request_id, filename);
                }
                Effect::ScheduleToastDismiss { toast_id, after } => {
                    let tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = tx.send(Msg::ToastExpired { toast_id });
                    });
                }
                Effect::ScrollToTop => {
                    // handled by the surface
                }
            }
        }
    }
}

/// Turns client completions into core messages.
struct MsgSink {
    tx: mpsc::Sender<Msg>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: ClientEvent) {
        let msg = match event {
            ClientEvent::ListCompleted { request_id, result } => Msg::ListLoaded {
                request_id,
                result: result.map(map_page).map_err(|err| {
                    digest_warn!("List request {} failed: {:?}", request_id, err);
                    user_message(&err)
                }),
            },
            ClientEvent::DetailCompleted {
                request_id,
                filename,
                result,
            } => Msg::DetailLoaded {
                request_id,
                result: result.map(map_detail).map_err(|err| {
                    digest_warn!(
                        "Detail request {} for {} failed: {:?}",
                        request_id,
                        filename,
                        err
                    );
                    user_message(&err)
                }),
            },
        };
        let _ = self.tx.send(msg);
    }
}

fn map_page(page: NewspaperPage) -> DigestPage {
    DigestPage {
        items: page
            .newspapers
            .into_iter()
            .map(|item| DigestSummary {
                filename: item.filename,
                title: item.title,
                publish_date: item.publish_date,
                bv_id: item.bv_id,
                overview: item.overview,
                news_count: item.news_count,
                organize_time: item.organize_time,
            })
            .collect(),
        pagination: PageInfo {
            current_page: page.pagination.current_page,
            total_count: page.pagination.total_count,
            total_pages: page.pagination.total_pages,
            has_prev: page.pagination.has_prev,
            has_next: page.pagination.has_next,
        },
    }
}

/// The API is trusted to deliver safe markup in `html_content`; this is the
/// only place where it is wrapped as such.
fn map_detail(detail: NewspaperDetail) -> DigestDetail {
    DigestDetail {
        title: detail.title,
        publish_date: detail.publish_date,
        bv_id: detail.bv_id,
        organize_time: detail.organize_time,
        news_count: detail.news_count,
        html_content: detail.html_content.map(TrustedHtml::from_trusted_source),
    }
}

fn user_message(err: &ApiError) -> String {
    match err.kind {
        FailureKind::Rejected => err.message.clone(),
        ref kind => kind.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_requests_show_server_message() {
        let err = ApiError {
            kind: FailureKind::Rejected,
            message: "newspaper not found".to_string(),
        };
        assert_eq!(user_message(&err), "newspaper not found");
    }

    #[test]
    fn transport_failures_show_their_kind() {
        let err = ApiError {
            kind: FailureKind::HttpStatus(502),
            message: "502 Bad Gateway".to_string(),
        };
        assert_eq!(user_message(&err), "http status 502");
        let err = ApiError {
            kind: FailureKind::Timeout,
            message: "operation timed out".to_string(),
        };
        assert_eq!(user_message(&err), "timeout");
    }

    #[test]
    fn detail_body_becomes_trusted_markup() {
        let detail = map_detail(NewspaperDetail {
            html_content: Some("<p>ok</p>".to_string()),
            ..NewspaperDetail::default()
        });
        assert_eq!(
            detail.html_content,
            Some(TrustedHtml::from_trusted_source("<p>ok</p>"))
        );
    }
}
