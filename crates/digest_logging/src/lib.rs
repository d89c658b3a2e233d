#![deny(missing_docs)]
//! Logging for the digest viewer workspace.
//!
//! Every crate logs through the `digest_*` macros below. They expand to the
//! `log` facade re-exported from here, so callers only need this crate. The
//! viewer binary installs the real backend with [`initialize`]; tests use
//! [`initialize_for_tests`].

use std::fs::File;
use std::path::Path;

#[doc(hidden)]
pub use log as __log;
pub use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Logs at trace level.
#[macro_export]
macro_rules! digest_trace {
    ($($arg:tt)*) => { $crate::__log::trace!($($arg)*) };
}

/// Logs at debug level.
#[macro_export]
macro_rules! digest_debug {
    ($($arg:tt)*) => { $crate::__log::debug!($($arg)*) };
}

/// Logs at info level.
#[macro_export]
macro_rules! digest_info {
    ($($arg:tt)*) => { $crate::__log::info!($($arg)*) };
}

/// Logs at warn level.
#[macro_export]
macro_rules! digest_warn {
    ($($arg:tt)*) => { $crate::__log::warn!($($arg)*) };
}

/// Logs at error level.
#[macro_export]
macro_rules! digest_error {
    ($($arg:tt)*) => { $crate::__log::error!($($arg)*) };
}

/// Default log file, relative to the working directory.
pub const LOG_FILE: &str = "digest_viewer.log";

/// Dependency crates whose records are dropped; they log every connection
/// and every webview event.
const NOISY_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "rustls", "tao", "wry"];

/// Where log records go. Read from the viewer configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    /// Log file only, keeping the terminal free for the console surface.
    File,
    /// Terminal only; warnings and errors go to stderr.
    #[default]
    Terminal,
    /// Terminal and log file.
    Both,
}

impl LogDestination {
    /// Whether records are written to the terminal.
    pub fn to_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }

    /// Whether records are written to the log file.
    pub fn to_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }
}

/// Installs the global logger.
///
/// The log file at `log_path` is truncated on start. When it cannot be
/// created the terminal is used instead, so records are never silently lost.
/// Only the first call in a process has any effect.
pub fn initialize(destination: LogDestination, level: LevelFilter, log_path: &Path) {
    let config = viewer_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if destination.to_file() {
        match File::create(log_path) {
            Ok(file) => loggers.push(WriteLogger::new(level, config.clone(), file)),
            Err(err) => eprintln!("Cannot create log file {}: {}", log_path.display(), err),
        }
    }
    if destination.to_terminal() || loggers.is_empty() {
        loggers.push(terminal(level, config));
    }

    let _ = CombinedLogger::init(loggers);
}

/// Installs a terminal logger for tests. Later calls are ignored, so every
/// test may call it.
pub fn initialize_for_tests() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = CombinedLogger::init(vec![terminal(level, Config::default())]);
}

fn terminal(level: LevelFilter, config: Config) -> Box<TermLogger> {
    TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}

fn viewer_config() -> Config {
    let mut builder = ConfigBuilder::new();
    builder
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off);
    for &target in NOISY_TARGETS {
        builder.add_filter_ignore_str(target);
    }
    builder.build()
}
