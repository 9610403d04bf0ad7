//! Blocking HTTP access to the OpenNEM statistics API.

use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::{AppError, EXIT_USAGE, FetchError};

pub const DEFAULT_BASE_URL: &str = "https://api.opennem.org.au";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable that overrides the API base URL.
pub const BASE_URL_ENV: &str = "NEM_API_BASE";

/// A completed HTTP exchange. The body is kept raw until a caller asks for JSON.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub url: String,
    pub status: u16,
    body: String,
}

impl ApiResponse {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json(&self) -> Result<Value, FetchError> {
        serde_json::from_str(&self.body).map_err(|source| FetchError::Decode {
            url: self.url.clone(),
            source,
        })
    }
}

/// Anything that can issue a single GET against the statistics API.
pub trait StatsFetch: Sync {
    fn fetch(&self, url: &str, params: &[(String, String)]) -> Result<ApiResponse, FetchError>;
}

pub struct StatsClient {
    client: Client,
}

impl StatsClient {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl StatsFetch for StatsClient {
    fn fetch(&self, url: &str, params: &[(String, String)]) -> Result<ApiResponse, FetchError> {
        info!("sending api request: {url}");

        let mut req = self.client.get(url);
        if !params.is_empty() {
            req = req.query(params);
        }

        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };
        let resp = req.send().map_err(transport)?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(transport)?;
        debug!("{url} -> {status} ({} bytes)", body.len());

        Ok(ApiResponse::new(url, status, body))
    }
}

/// Join an API base and a path, tolerating a missing or doubled slash.
pub fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}
