use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ScraperError;

/// 中国銀行 外国為替レート検索ページ
pub const BOC_SEARCH_URL: &str = "https://srh.bankofchina.com/search/whpj/searchen.jsp";

/// 検索結果ページ上のデータテーブル位置（0始まり、文書順で2番目の `<table>`）
pub const DEFAULT_TABLE_INDEX: usize = 1;

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub search_url: String,
    pub output_dir: PathBuf,
    /// 取得期間（今日から遡る日数）
    pub days_back: u32,
    pub timeout: Duration,
    /// 1 = 再試行なし
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    /// 1通貨あたりの同時ページ取得数（1 = 逐次）
    pub page_concurrency: usize,
    pub table_index: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            search_url: BOC_SEARCH_URL.to_string(),
            output_dir: PathBuf::from("./downloads"),
            days_back: 2,
            timeout: Duration::from_secs(3),
            max_attempts: 1,
            initial_backoff: Duration::from_millis(1000),
            page_concurrency: 1,
            table_index: DEFAULT_TABLE_INDEX,
        }
    }
}

impl ScraperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 環境変数から設定を読み込む（未設定の項目はデフォルト値）
    pub fn from_env() -> Result<Self, ScraperError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ScraperError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("FX_SEARCH_URL") {
            config.search_url = url;
        }
        if let Some(dir) = lookup("FX_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(days) = parse_var::<u32>(&lookup, "FX_DAYS_BACK")? {
            config.days_back = days;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "FX_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(attempts) = parse_var::<u32>(&lookup, "FX_MAX_ATTEMPTS")? {
            config = config.with_max_attempts(attempts);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "FX_BACKOFF_MS")? {
            config.initial_backoff = Duration::from_millis(ms);
        }
        if let Some(n) = parse_var::<usize>(&lookup, "FX_PAGE_CONCURRENCY")? {
            config = config.with_page_concurrency(n);
        }

        Ok(config)
    }

    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    pub fn with_output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    pub fn with_days_back(mut self, days: u32) -> Self {
        self.days_back = days;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    pub fn with_page_concurrency(mut self, n: usize) -> Self {
        self.page_concurrency = n.max(1);
        self
    }

    pub fn with_table_index(mut self, index: usize) -> Self {
        self.table_index = index;
        self
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ScraperError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ScraperError::Config(format!("{}={:?}: {}", key, raw, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ScraperConfig::default();
        assert_eq!(config.search_url, BOC_SEARCH_URL);
        assert_eq!(config.days_back, 2);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.page_concurrency, 1);
        assert_eq!(config.table_index, 1);
    }

    #[test]
    fn test_config_builder() {
        let config = ScraperConfig::new()
            .with_output_dir("/tmp/rates")
            .with_days_back(7)
            .with_timeout(Duration::from_secs(10))
            .with_max_attempts(0)
            .with_page_concurrency(0);

        assert_eq!(config.output_dir, PathBuf::from("/tmp/rates"));
        assert_eq!(config.days_back, 7);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.page_concurrency, 1);
    }

    #[test]
    fn test_from_lookup_reads_values() {
        let config = ScraperConfig::from_lookup(lookup_from(&[
            ("FX_OUTPUT_DIR", "./out"),
            ("FX_DAYS_BACK", "5"),
            ("FX_TIMEOUT_SECS", "8"),
            ("FX_MAX_ATTEMPTS", "3"),
            ("FX_BACKOFF_MS", "250"),
            ("FX_PAGE_CONCURRENCY", "4"),
        ]))
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("./out"));
        assert_eq!(config.days_back, 5);
        assert_eq!(config.timeout, Duration::from_secs(8));
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.initial_backoff, Duration::from_millis(250));
        assert_eq!(config.page_concurrency, 4);
        assert_eq!(config.search_url, BOC_SEARCH_URL);
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = ScraperConfig::from_lookup(lookup_from(&[("FX_DAYS_BACK", "two")])).unwrap_err();
        assert!(matches!(err, ScraperError::Config(_)));
    }
}
