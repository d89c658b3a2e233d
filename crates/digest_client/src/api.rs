use std::time::Duration;

use digest_logging::digest_debug;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use url::Url;

use crate::types::Envelope;
use crate::{ApiError, FailureKind, NewspaperDetail, NewspaperPage};

/// Message used when the server rejects a request without saying why.
pub const REJECTED_FALLBACK: &str = "request failed";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait NewspaperApi: Send + Sync {
    /// `GET /api/newspapers?page=P&page_size=S`
    async fn list(&self, page: u32, page_size: u32) -> Result<NewspaperPage, ApiError>;

    /// `GET /api/newspapers/{filename}`
    async fn detail(&self, filename: &str) -> Result<NewspaperDetail, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    settings: ApiSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            base,
            client,
        })
    }

    pub fn list_url(&self, page: u32, page_size: u32) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["api", "newspapers"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("page_size", &page_size.to_string());
        Ok(url)
    }

    /// The filename becomes a single percent-encoded path segment.
    pub fn detail_url(&self, filename: &str) -> Result<Url, ApiError> {
        self.endpoint(&["api", "newspapers", filename])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| ApiError::new(FailureKind::InvalidUrl, "base url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        digest_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        // Error statuses may still carry an envelope with the server's message.
        let envelope: Envelope<T> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ApiError::new(
                    FailureKind::HttpStatus(status.as_u16()),
                    status.to_string(),
                ));
            }
            Err(err) => return Err(ApiError::new(FailureKind::Decode, err.to_string())),
        };

        if !envelope.success {
            let message = envelope
                .error
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| REJECTED_FALLBACK.to_string());
            return Err(ApiError::new(FailureKind::Rejected, message));
        }
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        envelope
            .data
            .ok_or_else(|| ApiError::new(FailureKind::Decode, "response has no data"))
    }
}

#[async_trait::async_trait]
impl NewspaperApi for ReqwestApi {
    async fn list(&self, page: u32, page_size: u32) -> Result<NewspaperPage, ApiError> {
        let url = self.list_url(page, page_size)?;
        self.get(url).await
    }

    async fn detail(&self, filename: &str) -> Result<NewspaperDetail, ApiError> {
        let url = self.detail_url(filename)?;
        self.get(url).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
