use digest_core::{Key, Msg};
use digest_logging::digest_warn;
use serde::Deserialize;

/// Actions posted by the page script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Action {
    Ready,
    Page { page: u32 },
    Prev,
    Next,
    Open { filename: String },
    Back,
    Refresh,
    RefreshDetail,
    Key { key: String },
}

impl From<Action> for Msg {
    fn from(action: Action) -> Self {
        match action {
            Action::Ready => Msg::Started,
            Action::Page { page } => Msg::PageRequested(page),
            Action::Prev => Msg::PrevPageClicked,
            Action::Next => Msg::NextPageClicked,
            Action::Open { filename } => Msg::CardSelected { filename },
            Action::Back => Msg::BackClicked,
            Action::Refresh => Msg::RefreshClicked,
            Action::RefreshDetail => Msg::RefreshDetailClicked,
            Action::Key { key } => Msg::KeyPressed(Key::from_dom_key(&key)),
        }
    }
}

/// Parses an IPC body; anything unrecognised becomes `Msg::NoOp`.
pub fn parse_action(body: &str) -> Msg {
    match serde_json::from_str::<Action>(body) {
        Ok(action) => action.into(),
        Err(err) => {
            let preview: String = body.chars().take(200).collect();
            digest_warn!("Ignoring IPC message {:?}: {}", preview, err);
            Msg::NoOp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn maps_page_actions() {
        assert_eq!(parse_action(r#"{"action":"ready"}"#), Msg::Started);
        assert_eq!(
            parse_action(r#"{"action":"page","page":4}"#),
            Msg::PageRequested(4)
        );
        assert_eq!(parse_action(r#"{"action":"prev"}"#), Msg::PrevPageClicked);
        assert_eq!(parse_action(r#"{"action":"next"}"#), Msg::NextPageClicked);
        assert_eq!(parse_action(r#"{"action":"refresh"}"#), Msg::RefreshClicked);
    }

    #[test]
    fn maps_detail_actions() {
        assert_eq!(
            parse_action(r#"{"action":"open","filename":"2024-06-14.json"}"#),
            Msg::CardSelected {
                filename: "2024-06-14.json".to_string()
            }
        );
        assert_eq!(parse_action(r#"{"action":"back"}"#), Msg::BackClicked);
        assert_eq!(
            parse_action(r#"{"action":"refresh_detail"}"#),
            Msg::RefreshDetailClicked
        );
    }

    #[test]
    fn maps_keys() {
        assert_eq!(
            parse_action(r#"{"action":"key","key":"Escape"}"#),
            Msg::KeyPressed(Key::Escape)
        );
        assert_eq!(
            parse_action(r#"{"action":"key","key":"ArrowRight"}"#),
            Msg::KeyPressed(Key::ArrowRight)
        );
        assert_eq!(
            parse_action(r#"{"action":"key","key":"Enter"}"#),
            Msg::KeyPressed(Key::Other)
        );
    }

    #[test]
    fn malformed_messages_are_ignored() {
        assert_eq!(parse_action("not json"), Msg::NoOp);
        assert_eq!(parse_action(r#"{"action":"explode"}"#), Msg::NoOp);
        assert_eq!(parse_action(r#"{"action":"page","page":"two"}"#), Msg::NoOp);
        assert_eq!(parse_action(r#"{"action":"open"}"#), Msg::NoOp);
    }
}
