mod app;
mod config;
mod console;
mod effects;
pub mod ui;
#[cfg(feature = "webview")]
mod webview;

use std::path::Path;
use std::sync::{mpsc, Arc};

use anyhow::Context;
use digest_client::ReqwestApi;
use digest_core::Msg;
use digest_logging::{digest_info, digest_warn, LevelFilter, LOG_FILE};

use app::Driver;
use effects::EffectRunner;

pub fn run_app() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let (config, config_error) = match config::read_config(&cwd) {
        Ok(config) => (config, None),
        Err(err) => (config::ViewerConfig::default(), Some(err)),
    };

    digest_logging::initialize(config.log_destination, LevelFilter::Info, Path::new(LOG_FILE));
    if let Some(err) = config_error {
        digest_warn!("Using default configuration: {}", err);
    }
    digest_info!("Digest viewer starting against {}", config.base_url);

    let api = ReqwestApi::new(config.api_settings()).context("failed to build HTTP client")?;
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let driver = Driver::new(EffectRunner::new(Arc::new(api), msg_tx.clone()));

    #[cfg(feature = "webview")]
    if !std::env::args().skip(1).any(|arg| arg == "--console") {
        return webview::run(driver, msg_tx, msg_rx);
    }

    console::run(driver, msg_tx, msg_rx, config.snapshot_path)
}
