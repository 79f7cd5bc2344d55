use std::fmt;

use serde::{Deserialize, Serialize};

use crate::HeaderMap;

/// Path of the backend endpoint, relative to the backend base URL.
pub const SCRAPE_ENDPOINT: &str = "/api/scrape";

pub const DEFAULT_RATE_LIMIT: u32 = 5;
pub const MIN_RATE_LIMIT: u32 = 1;
pub const MAX_RATE_LIMIT: u32 = 20;

/// Body of `POST /api/scrape`. Absent optional fields are omitted, never `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub urls: Vec<String>,
    pub rate_limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeaderMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// One backend result. Order relative to the request is not guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub url: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The single body a result renders with, chosen by `success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOutcome<'a> {
    Snippet(&'a str),
    Error(&'a str),
}

const MISSING_ERROR_TEXT: &str = "unknown error";

impl ScrapeResult {
    pub fn succeeded(url: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            success: true,
            snippet: Some(snippet.into()),
            error: None,
        }
    }

    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            success: false,
            snippet: None,
            error: Some(error.into()),
        }
    }

    pub fn outcome(&self) -> ResultOutcome<'_> {
        if self.success {
            ResultOutcome::Snippet(self.snippet.as_deref().unwrap_or_default())
        } else {
            ResultOutcome::Error(self.error.as_deref().unwrap_or(MISSING_ERROR_TEXT))
        }
    }
}

/// One timestamped line of the live log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(timestamp: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp, self.message)
    }
}

/// File name for exporting the result at zero-based `index`: `result-<index + 1>.json`.
pub fn export_filename(index: usize) -> String {
    format!("result-{}.json", index + 1)
}
