//! 為替レート履歴スクレイパーライブラリ
//!
//! - 中国銀行の検索ページから通貨リストを取得
//! - 通貨ごとに全ページのレートを取得してCSVに出力
//!
//! # 使用例
//!
//! ```rust,ignore
//! use fx_rate_scraper::{runner, ScraperConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScraperConfig::new()
//!         .with_output_dir("./rates")
//!         .with_days_back(2);
//!
//!     let summary = runner::run(&config).await.unwrap();
//!     println!("CSV files: {:?}", summary.exported);
//! }
//! ```
//!
//! # 1通貨のみ取得
//!
//! ```rust,ignore
//! use fx_rate_scraper::{QueryWindow, RateScraperService, ReqwestTransport, ScrapeRequest, ScraperConfig};
//! use std::sync::Arc;
//! use tower::ServiceExt;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScraperConfig::default();
//!     let transport = Arc::new(ReqwestTransport::new().unwrap());
//!     let service = RateScraperService::from_config(transport, &config);
//!
//!     let today = chrono::Local::now().date_naive();
//!     let request = ScrapeRequest::new("USD", QueryWindow::trailing(today, 2).unwrap());
//!     let result = service.oneshot(request).await.unwrap();
//!     println!("Records: {}", result.record_count);
//! }
//! ```

pub mod boc;
pub mod config;
pub mod error;
pub mod export;
pub mod runner;
pub mod service;
pub mod traits;
pub mod transport;

#[cfg(test)]
mod testing;

// 主要な型をリエクスポート
pub use boc::{ExchangeRecord, PaginationInfo, Pipeline, QueryWindow};
pub use config::ScraperConfig;
pub use error::{ResolutionError, ScraperError, TransportError};
pub use export::CsvExporter;
pub use runner::{RunDriver, RunSummary};
pub use service::{RateScraperService, ScrapeRequest, ScrapeResult};
pub use traits::{Exporter, Transport};
pub use transport::{ReqwestTransport, RetryPolicy};
