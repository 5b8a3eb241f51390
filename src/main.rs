//! 為替レート履歴スクレイパー
//!
//! 実行方法:
//! ```
//! FX_OUTPUT_DIR=./rates cargo run --release
//! ```
//!
//! 設定は環境変数から読み込む（`FX_OUTPUT_DIR`, `FX_DAYS_BACK`, `FX_TIMEOUT_SECS`,
//! `FX_MAX_ATTEMPTS`, `FX_BACKOFF_MS`, `FX_PAGE_CONCURRENCY`, `FX_SEARCH_URL`）。

use fx_rate_scraper::{runner, ScraperConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ログ設定
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ScraperConfig::from_env()?;
    info!(
        "Output directory: {}, days back: {}",
        config.output_dir.display(),
        config.days_back
    );

    // 通貨ごとの失敗は終了コードに影響しない
    match runner::run(&config).await {
        Ok(summary) => {
            for (currency, reason) in &summary.failed {
                error!("{}: {}", currency, reason);
            }
            Ok(())
        }
        Err(e) => {
            error!("Run aborted: {}", e);
            Err(e.into())
        }
    }
}
