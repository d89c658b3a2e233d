use digest_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn refresh_detail_without_selection_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::RefreshDetailClicked);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
