use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tower::Service;
use tracing::info;

use crate::boc::{Pipeline, QueryWindow};
use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::export::CsvExporter;
use crate::traits::{Exporter, Transport};

/// 1通貨分のスクレイピングリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub currency: String,
    pub window: QueryWindow,
}

impl ScrapeRequest {
    pub fn new(currency: impl Into<String>, window: QueryWindow) -> Self {
        Self {
            currency: currency.into(),
            window,
        }
    }

    pub fn file_stem(&self) -> String {
        self.window.file_stem(&self.currency)
    }
}

/// スクレイピング結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeResult {
    pub currency: String,
    pub record_count: usize,
    /// レコードが0件の場合は出力しない
    pub csv_path: Option<PathBuf>,
}

/// tower::Serviceを実装した通貨単位のスクレイパーサービス
#[derive(Clone)]
pub struct RateScraperService {
    pipeline: Arc<Pipeline>,
    exporter: Arc<dyn Exporter>,
}

impl RateScraperService {
    pub fn new(pipeline: Arc<Pipeline>, exporter: Arc<dyn Exporter>) -> Self {
        Self { pipeline, exporter }
    }

    /// 設定からパイプラインとCSV出力を組み立てる
    pub fn from_config(transport: Arc<dyn Transport>, config: &ScraperConfig) -> Self {
        Self::new(
            Arc::new(Pipeline::new(transport, config)),
            Arc::new(CsvExporter::new(config.output_dir.clone())),
        )
    }
}

impl Service<ScrapeRequest> for RateScraperService {
    type Response = ScrapeResult;
    type Error = ScraperError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ScrapeRequest) -> Self::Future {
        info!("Started scraping {}", req.currency);

        let pipeline = self.pipeline.clone();
        let exporter = self.exporter.clone();

        Box::pin(async move {
            let records = pipeline.run(&req.currency, req.window).await?;

            if records.is_empty() {
                return Ok(ScrapeResult {
                    currency: req.currency,
                    record_count: 0,
                    csv_path: None,
                });
            }

            let csv_path = exporter.export(&records, &req.file_stem())?;
            info!(
                "Exported {} records for {}: {:?}",
                records.len(),
                req.currency,
                csv_path
            );

            Ok(ScrapeResult {
                currency: req.currency,
                record_count: records.len(),
                csv_path: Some(csv_path),
            })
        })
    }
}
