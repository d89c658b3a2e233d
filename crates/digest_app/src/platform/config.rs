use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use digest_client::ApiSettings;
use digest_logging::LogDestination;
use serde::{Deserialize, Serialize};

pub(crate) const CONFIG_FILENAME: &str = "digest_viewer.ron";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ViewerConfig {
    pub(crate) base_url: String,
    pub(crate) connect_timeout_secs: u64,
    pub(crate) request_timeout_secs: u64,
    pub(crate) max_body_bytes: u64,
    pub(crate) log_destination: LogDestination,
    /// When set, the console surface writes the rendered page here.
    pub(crate) snapshot_path: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            base_url: api.base_url,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.as_secs(),
            max_body_bytes: api.max_bytes,
            log_destination: LogDestination::default(),
            snapshot_path: None,
        }
    }
}

impl ViewerConfig {
    pub(crate) fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_body_bytes,
        }
    }
}

/// Reads `digest_viewer.ron` from `dir`. A missing file yields the defaults.
pub(crate) fn read_config(dir: &Path) -> Result<ViewerConfig, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ViewerConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path,
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = read_config(dir.path()).unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.api_settings().request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn partial_file_overrides_selected_fields() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"(
                base_url: "http://digests.local:9000",
                request_timeout_secs: 5,
                log_destination: Both,
                snapshot_path: Some("view.html"),
            )"#,
        )
        .unwrap();

        let config = read_config(dir.path()).unwrap();
        assert_eq!(config.base_url, "http://digests.local:9000");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.snapshot_path, Some(PathBuf::from("view.html")));
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "(base_url: 42)").unwrap();

        let err = read_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
