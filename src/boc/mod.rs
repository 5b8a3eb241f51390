//! 中国銀行 外国為替レート検索ページ用スクレイパーモジュール
//!
//! 検索結果は `page` パラメータ付きPOSTでページ送りされ、
//! 総件数とページサイズは `<script>` 内の変数代入として埋め込まれている。

mod catalog;
mod client;
mod fetcher;
mod pagination;
mod pipeline;
mod table;
mod types;

pub use catalog::{parse_catalog, CatalogFetcher};
pub use client::{SearchClient, SearchForm};
pub use fetcher::PageFetcher;
pub use pagination::{parse_pagination, PaginationResolver, PAGE_SIZE_MARKER, RECORD_COUNT_MARKER};
pub use pipeline::Pipeline;
pub use table::TableExtractor;
pub use types::{ExchangeRecord, PageRows, PaginationInfo, QueryWindow, DATE_FORMAT};
