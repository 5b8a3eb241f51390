//! 通貨ごとの全ページ取得
//!
//! ページ情報の解決 → 各ページの取得 → 結果の連結。
//! ページ情報の解決に失敗した通貨は空の結果として扱い、実行全体は止めない。

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::traits::Transport;

use super::client::SearchClient;
use super::fetcher::PageFetcher;
use super::pagination::PaginationResolver;
use super::table::TableExtractor;
use super::types::{ExchangeRecord, PageRows, QueryWindow};

pub struct Pipeline {
    resolver: PaginationResolver,
    fetcher: PageFetcher,
    page_concurrency: usize,
}

impl Pipeline {
    pub fn new(transport: Arc<dyn Transport>, config: &ScraperConfig) -> Self {
        let client = SearchClient::new(transport, config);
        Self::from_parts(
            PaginationResolver::new(client.clone()),
            PageFetcher::new(client, TableExtractor::new(config.table_index)),
            config.page_concurrency,
        )
    }

    pub fn from_parts(
        resolver: PaginationResolver,
        fetcher: PageFetcher,
        page_concurrency: usize,
    ) -> Self {
        Self {
            resolver,
            fetcher,
            page_concurrency: page_concurrency.max(1),
        }
    }

    /// 1通貨分のレコードをページ順・行順で返す
    ///
    /// - ページ情報が取れない / 0ページ → 空
    /// - データなし・通信失敗のページ → スキップ
    /// - 行の形式不正 → `Err`（この通貨のみ中断）
    pub async fn run(
        &self,
        currency: &str,
        window: QueryWindow,
    ) -> Result<Vec<ExchangeRecord>, ScraperError> {
        let info = match self.resolver.resolve(currency, window).await {
            Ok(info) => info,
            Err(e) => {
                warn!("Error loading pages for {}: {}", currency, e);
                return Ok(Vec::new());
            }
        };

        if info.page_count < 1 {
            warn!("No pages available for {}", currency);
            return Ok(Vec::new());
        }

        // buffered は完了順ではなく投入順で結果を返す
        let mut pages = stream::iter(1..=info.page_count)
            .map(|page| async move {
                let result = self.fetcher.fetch_page(currency, page, window).await;
                (page, result)
            })
            .buffered(self.page_concurrency);

        let mut records = Vec::new();
        while let Some((page, result)) = pages.next().await {
            match result {
                Ok(PageRows::Records(rows)) => {
                    info!(
                        "Downloaded {} records from page {} for {}",
                        rows.len(),
                        page,
                        currency
                    );
                    records.extend(rows);
                }
                Ok(PageRows::NoData) => {
                    warn!("Unable to load rows on page {} for {}", page, currency);
                }
                Err(ScraperError::Transport(e)) => {
                    warn!("Request for page {} of {} failed: {}", page, currency, e);
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Total downloaded records for currency {}: {}",
            currency,
            records.len()
        );
        Ok(records)
    }
}
