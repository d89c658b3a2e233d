#[cfg(any(feature = "webview", test))]
pub mod actions;
pub mod page;
pub mod render;
