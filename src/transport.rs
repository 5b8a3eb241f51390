//! HTTP 送信層
//!
//! `Transport` の reqwest 実装と、再試行ポリシーを提供する。

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::ScraperConfig;
use crate::error::{TransportError, TransportErrorKind};
use crate::traits::Transport;

const USER_AGENT: &str = concat!("fx-rate-scraper/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// POST時は `application/x-www-form-urlencoded` として送信
    pub body: Option<String>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            body: None,
            timeout: Duration::from_secs(3),
        }
    }

    pub fn post_form(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            body: Some(body.into()),
            timeout: Duration::from_secs(3),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// reqwest による本番用トランスポート
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::new(TransportErrorKind::Other, e.to_string()))?;
        Ok(Self { client })
    }
}

fn classify(e: &reqwest::Error) -> TransportErrorKind {
    if e.is_timeout() {
        TransportErrorKind::Timeout
    } else if e.is_connect() {
        TransportErrorKind::Connect
    } else {
        TransportErrorKind::Other
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<String, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        builder = builder.timeout(request.timeout);

        if let Some(body) = request.body {
            if request.method == HttpMethod::Post {
                builder = builder
                    .header(
                        reqwest::header::CONTENT_TYPE,
                        "application/x-www-form-urlencoded",
                    )
                    .body(body);
            }
        }

        let response = builder.send().await.map_err(|e| {
            TransportError::new(
                classify(&e),
                format!("{} {} failed: {}", request.method.as_str(), request.url, e),
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                TransportErrorKind::Status(status.as_u16()),
                format!("{} {} returned {}", request.method.as_str(), request.url, status),
            ));
        }

        response.text().await.map_err(|e| {
            TransportError::new(
                TransportErrorKind::Body,
                format!("failed to read response body: {}", e),
            )
        })
    }
}

/// 再試行ポリシー
///
/// `max_attempts = 1` は「1回だけ試行して失敗を報告」。
/// 2以上の場合は再試行可能なエラーに限り `initial_backoff * 2^n` 待って再送する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &ScraperConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_backoff: config.initial_backoff,
        }
    }

    pub fn backoff(&self, attempt: u32) -> Duration {
        self.initial_backoff * 2u32.saturating_pow(attempt)
    }
}

/// リトライ付きで送信
pub async fn send_with_retry(
    transport: &dyn Transport,
    request: HttpRequest,
    policy: RetryPolicy,
) -> Result<String, TransportError> {
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        debug!(
            "Created request: {} {} {}",
            request.method.as_str(),
            request.url,
            request.body.as_deref().unwrap_or("")
        );

        match transport.send(request.clone()).await {
            Ok(body) => return Ok(body),
            Err(e) if e.is_retryable() && attempt + 1 < attempts => {
                let backoff = policy.backoff(attempt);
                warn!(
                    "Request attempt {} failed, retrying in {}ms: {}",
                    attempt + 1,
                    backoff.as_millis(),
                    e
                );
                sleep(backoff).await;
                attempt += 1;
            }
            Err(e) => {
                warn!(
                    "Request failed: {} {}: {}",
                    request.method.as_str(),
                    request.url,
                    e
                );
                return Err(e);
            }
        }
    }
}
