use crate::{DigestDetail, DigestPage, RequestId, ToastId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Viewer is up; load the first page.
    Started,
    /// User clicked a numbered page button.
    PageRequested(u32),
    /// User clicked the Previous button.
    PrevPageClicked,
    /// User clicked the Next button.
    NextPageClicked,
    /// User selected a digest card.
    CardSelected { filename: String },
    /// User clicked Back in the detail view.
    BackClicked,
    /// User asked to reload the current list page.
    RefreshClicked,
    /// User asked to reload the open digest.
    RefreshDetailClicked,
    KeyPressed(Key),
    /// List request finished. Errors carry a user-facing message.
    ListLoaded {
        request_id: RequestId,
        result: Result<DigestPage, String>,
    },
    /// Detail request finished. Errors carry a user-facing message.
    DetailLoaded {
        request_id: RequestId,
        result: Result<DigestDetail, String>,
    },
    /// A notification reached the end of its display time.
    ToastExpired { toast_id: ToastId },
    /// Fallback for unrecognised input.
    NoOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}
