//! 通貨リスト（検索フォームの `select#pjname` の選択肢）

use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::error::ScraperError;

use super::client::SearchClient;

const CURRENCY_OPTION_SELECTOR: &str = "select#pjname option";

/// 先頭（プレースホルダー）を除いた選択肢の `value` をページ順に返す
pub fn parse_catalog(html: &str) -> Result<Vec<String>, ScraperError> {
    let sel = Selector::parse(CURRENCY_OPTION_SELECTOR).map_err(|e| {
        ScraperError::InvalidSelector(format!("{}: {}", CURRENCY_OPTION_SELECTOR, e))
    })?;
    let document = Html::parse_document(html);

    let currencies = document
        .select(&sel)
        .skip(1)
        .filter_map(|option| option.value().attr("value"))
        .map(str::to_string)
        .collect();
    Ok(currencies)
}

pub struct CatalogFetcher {
    client: SearchClient,
}

impl CatalogFetcher {
    pub fn new(client: SearchClient) -> Self {
        Self { client }
    }

    pub async fn fetch(&self) -> Result<Vec<String>, ScraperError> {
        let body = self.client.get().await?;
        let currencies = parse_catalog(&body)?;

        if currencies.is_empty() {
            warn!("No currencies found at {}", self.client.url());
            return Err(ScraperError::Catalog(format!(
                "{} に通貨の選択肢がありません",
                self.client.url()
            )));
        }

        info!("Found {} available currencies", currencies.len());
        Ok(currencies)
    }
}
