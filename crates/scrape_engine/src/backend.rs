use async_trait::async_trait;
use client_logging::{client_debug, client_warn};
use reqwest::header::CONTENT_TYPE;
use scrape_core::{ScrapeRequest, ScrapeResult, SCRAPE_ENDPOINT};
use url::Url;

use crate::{BackendError, BackendReply};

/// Local backend the `/api` prefix is forwarded to during development.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3030";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSettings {
    pub base_url: Url,
    pub endpoint: String,
}

impl BackendSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            endpoint: SCRAPE_ENDPOINT.to_string(),
        }
    }

    pub fn parse(base_url: &str) -> Result<Self, BackendError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| BackendError::InvalidEndpoint(format!("{base_url}: {err}")))?;
        Ok(Self::new(base_url))
    }

    pub fn endpoint_url(&self) -> Result<Url, BackendError> {
        self.base_url
            .join(&self.endpoint)
            .map_err(|err| BackendError::InvalidEndpoint(format!("{}: {err}", self.endpoint)))
    }
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// Sends one scrape request. Exactly one attempt; no retries.
    async fn scrape(&self, request: &ScrapeRequest) -> Result<BackendReply, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    endpoint: Url,
}

impl ReqwestBackend {
    pub fn new(settings: &BackendSettings) -> Result<Self, BackendError> {
        let endpoint = settings.endpoint_url()?;
        // No timeout override: the transport's own defaults govern failures.
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| BackendError::Transport(err.to_string()))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Backend for ReqwestBackend {
    async fn scrape(&self, request: &ScrapeRequest) -> Result<BackendReply, BackendError> {
        let body =
            serde_json::to_vec(request).map_err(|err| BackendError::Encode(err.to_string()))?;
        client_debug!(
            "POST {} urls={} body_len={}",
            self.endpoint,
            request.urls.len(),
            body.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|err| format!("<unreadable body: {err}>"));
            client_warn!("Backend replied {} body_len={}", status, body.len());
            return Err(BackendError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(|err| BackendError::Decode {
            status: status.as_u16(),
            message: err.to_string(),
        })?;
        let results: Vec<ScrapeResult> =
            serde_json::from_str(&text).map_err(|err| BackendError::Decode {
                status: status.as_u16(),
                message: err.to_string(),
            })?;

        Ok(BackendReply {
            status: status.as_u16(),
            results,
        })
    }
}
