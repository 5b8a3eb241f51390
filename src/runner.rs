//! 全通貨の実行
//!
//! 通貨リストを1回だけ取得し、通貨ごとに `RateScraperService` を呼び出す。
//! 1通貨の失敗は記録して次の通貨へ進む。

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use tower::{Service, ServiceExt};
use tracing::{error, info};

use crate::boc::{CatalogFetcher, QueryWindow, SearchClient};
use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::service::{RateScraperService, ScrapeRequest};
use crate::traits::Transport;
use crate::transport::ReqwestTransport;

/// 実行結果のまとめ
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub exported: Vec<PathBuf>,
    /// レコードなし（ページ情報の取得失敗を含む）
    pub skipped: Vec<String>,
    /// (通貨, エラー内容)
    pub failed: Vec<(String, String)>,
}

pub struct RunDriver {
    service: RateScraperService,
}

impl RunDriver {
    pub fn new(service: RateScraperService) -> Self {
        Self { service }
    }

    pub async fn run_all(&mut self, catalog: &[String], window: QueryWindow) -> RunSummary {
        let mut summary = RunSummary::default();

        for currency in catalog {
            let request = ScrapeRequest::new(currency.clone(), window);
            let result = match self.service.ready().await {
                Ok(service) => service.call(request).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(result) => match result.csv_path {
                    Some(path) => summary.exported.push(path),
                    None => {
                        info!("No records for {}, skipping export", currency);
                        summary.skipped.push(currency.clone());
                    }
                },
                Err(e) => {
                    error!("Scraping {} failed: {}", currency, e);
                    summary.failed.push((currency.clone(), e.to_string()));
                }
            }
        }

        info!(
            "Run completed: {} exported, {} skipped, {} failed",
            summary.exported.len(),
            summary.skipped.len(),
            summary.failed.len()
        );
        summary
    }
}

/// 通貨リストを取得し、今日までの期間で全通貨を実行
pub async fn run_with_transport(
    transport: Arc<dyn Transport>,
    config: &ScraperConfig,
) -> Result<RunSummary, ScraperError> {
    let window = QueryWindow::trailing(Local::now().date_naive(), config.days_back)?;
    let catalog = CatalogFetcher::new(SearchClient::new(transport.clone(), config))
        .fetch()
        .await?;

    info!(
        "Scraping {} currencies from {} to {}",
        catalog.len(),
        window.start_str(),
        window.end_str()
    );

    let mut driver = RunDriver::new(RateScraperService::from_config(transport, config));
    Ok(driver.run_all(&catalog, window).await)
}

pub async fn run(config: &ScraperConfig) -> Result<RunSummary, ScraperError> {
    let transport = Arc::new(ReqwestTransport::new()?);
    run_with_transport(transport, config).await
}
