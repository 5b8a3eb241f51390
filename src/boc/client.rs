//! 検索ページへのリクエスト生成

use std::sync::Arc;
use std::time::Duration;

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::traits::Transport;
use crate::transport::{send_with_retry, HttpRequest, RetryPolicy};

use super::types::QueryWindow;

/// 検索フォームの入力値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm<'a> {
    pub currency: &'a str,
    pub window: QueryWindow,
    /// 1始まり。`None` の場合はページ指定なし（ページ情報取得用）
    pub page: Option<u64>,
}

impl<'a> SearchForm<'a> {
    pub fn new(currency: &'a str, window: QueryWindow) -> Self {
        Self {
            currency,
            window,
            page: None,
        }
    }

    pub fn with_page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// `erectDate=<開始日>&nothing=<終了日>&pjname=<通貨>[&page=<n>]`
    pub fn encode(&self) -> String {
        let mut body = format!(
            "erectDate={}&nothing={}&pjname={}",
            self.window.start_str(),
            self.window.end_str(),
            urlencoding::encode(self.currency)
        );
        if let Some(page) = self.page {
            body.push_str(&format!("&page={}", page));
        }
        body
    }
}

/// 検索ページ用クライアント（トランスポート・URL・タイムアウト・再試行ポリシーを束ねる）
#[derive(Clone)]
pub struct SearchClient {
    transport: Arc<dyn Transport>,
    url: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl SearchClient {
    pub fn new(transport: Arc<dyn Transport>, config: &ScraperConfig) -> Self {
        Self {
            transport,
            url: config.search_url.clone(),
            timeout: config.timeout,
            retry: RetryPolicy::from_config(config),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn get(&self) -> Result<String, ScraperError> {
        let request = HttpRequest::get(&self.url).with_timeout(self.timeout);
        Ok(send_with_retry(self.transport.as_ref(), request, self.retry).await?)
    }

    pub async fn search(&self, form: &SearchForm<'_>) -> Result<String, ScraperError> {
        let request = HttpRequest::post_form(&self.url, form.encode()).with_timeout(self.timeout);
        Ok(send_with_retry(self.transport.as_ref(), request, self.retry).await?)
    }
}
