use digest_logging::{digest_debug, digest_info, digest_warn};

use crate::{AppState, Effect, Key, Msg, ToastKind, ViewRegion, PAGE_SIZE, TOAST_DURATION};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => load_list(&mut state, 1, false),
        Msg::PageRequested(page) => load_list(&mut state, page, false),
        Msg::PrevPageClicked => {
            if state.has_prev() {
                let page = state.page_state().current_page.saturating_sub(1);
                load_list(&mut state, page, false)
            } else {
                Vec::new()
            }
        }
        Msg::NextPageClicked => {
            if state.has_next() {
                let page = state.page_state().current_page.saturating_add(1);
                load_list(&mut state, page, false)
            } else {
                Vec::new()
            }
        }
        Msg::CardSelected { filename } => load_detail(&mut state, filename, false),
        Msg::BackClicked => {
            state.show_list();
            Vec::new()
        }
        Msg::RefreshClicked => {
            let page = state.page_state().current_page;
            load_list(&mut state, page, true)
        }
        Msg::RefreshDetailClicked => match state.selection() {
            Some(filename) => {
                let filename = filename.to_owned();
                load_detail(&mut state, filename, true)
            }
            None => Vec::new(),
        },
        Msg::KeyPressed(key) => handle_key(&mut state, key),
        Msg::ListLoaded { request_id, result } => {
            let Some(pending) = state.finish_list_request(request_id) else {
                digest_debug!("Dropping stale list response request_id={}", request_id);
                return (state, Vec::new());
            };
            match result {
                Ok(page) => {
                    digest_info!(
                        "Loaded page {} of {} ({} digests)",
                        page.pagination.current_page,
                        page.pagination.total_pages,
                        page.items.len()
                    );
                    state.apply_page(page);
                    if pending.refresh {
                        notify(&mut state, ToastKind::Success, "Digests refreshed".to_string())
                    } else {
                        Vec::new()
                    }
                }
                Err(message) => {
                    digest_warn!("List request {} failed: {}", request_id, message);
                    notify(
                        &mut state,
                        ToastKind::Error,
                        format!("Failed to load digests: {message}"),
                    )
                }
            }
        }
        Msg::DetailLoaded { request_id, result } => {
            let Some(pending) = state.finish_detail_request(request_id) else {
                digest_debug!("Dropping stale detail response request_id={}", request_id);
                return (state, Vec::new());
            };
            match result {
                Ok(detail) => {
                    state.open_detail(pending.filename, detail);
                    let mut effects = vec![Effect::ScrollToTop];
                    if pending.refresh {
                        effects.extend(notify(
                            &mut state,
                            ToastKind::Success,
                            "Details refreshed".to_string(),
                        ));
                    }
                    effects
                }
                Err(message) => {
                    digest_warn!(
                        "Detail request {} for {} failed: {}",
                        request_id,
                        pending.filename,
                        message
                    );
                    notify(
                        &mut state,
                        ToastKind::Error,
                        format!("Failed to load details: {message}"),
                    )
                }
            }
        }
        Msg::ToastExpired { toast_id } => {
            state.dismiss_toast(toast_id);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn load_list(state: &mut AppState, page: u32, refresh: bool) -> Vec<Effect> {
    let request_id = state.begin_list_request(refresh);
    vec![Effect::FetchList {
        request_id,
        page,
        page_size: PAGE_SIZE,
    }]
}

fn load_detail(state: &mut AppState, filename: String, refresh: bool) -> Vec<Effect> {
    let request_id = state.begin_detail_request(filename.clone(), refresh);
    vec![Effect::FetchDetail {
        request_id,
        filename,
    }]
}

fn handle_key(state: &mut AppState, key: Key) -> Vec<Effect> {
    let page = state.page_state();
    match (state.region(), key) {
        (ViewRegion::Detail, Key::Escape) => {
            state.show_list();
            Vec::new()
        }
        (ViewRegion::List, Key::ArrowLeft) if page.current_page > 1 => {
            load_list(state, page.current_page - 1, false)
        }
        (ViewRegion::List, Key::ArrowRight) if page.current_page < page.total_pages => {
            load_list(state, page.current_page + 1, false)
        }
        _ => Vec::new(),
    }
}

fn notify(state: &mut AppState, kind: ToastKind, message: String) -> Vec<Effect> {
    let toast_id = state.push_toast(kind, message);
    vec![Effect::ScheduleToastDismiss {
        toast_id,
        after: TOAST_DURATION,
    }]
}
