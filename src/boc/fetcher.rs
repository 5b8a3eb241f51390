use crate::error::ScraperError;

use super::client::{SearchClient, SearchForm};
use super::table::TableExtractor;
use super::types::{PageRows, QueryWindow};

/// 1ページ分の検索結果を取得してテーブルを抽出
pub struct PageFetcher {
    client: SearchClient,
    extractor: TableExtractor,
}

impl PageFetcher {
    pub fn new(client: SearchClient, extractor: TableExtractor) -> Self {
        Self { client, extractor }
    }

    pub async fn fetch_page(
        &self,
        currency: &str,
        page: u64,
        window: QueryWindow,
    ) -> Result<PageRows, ScraperError> {
        let form = SearchForm::new(currency, window).with_page(page);
        let body = self.client.search(&form).await?;
        self.extractor.extract(&body)
    }
}
