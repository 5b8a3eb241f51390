//! ページ情報の解決
//!
//! 検索結果ページの `<script>` 内に埋め込まれた
//! `m_nRecordCount = <件数>;` と `m_nPageSize = <件数>;` からページ数を求める。
//! 件数の代入はページサイズの代入より前に現れる必要がある
//! （ページサイズのマーカーより前の部分だけを件数の検索対象にするため）。

use tracing::{debug, info};

use crate::error::{ResolutionError, ScraperError};

use super::client::{SearchClient, SearchForm};
use super::types::{PaginationInfo, QueryWindow};

pub const PAGE_SIZE_MARKER: &str = "m_nPageSize";
pub const RECORD_COUNT_MARKER: &str = "m_nRecordCount";

/// `marker` で分割し、(最初のマーカーより前, 最初と2番目のマーカーの間) を返す
fn split_on_marker<'a>(text: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let mut parts = text.split(marker);
    let before = parts.next()?;
    let after = parts.next()?;
    Some((before, after))
}

/// `= 20;...` のような断片から最初の `;` までを取り出し、`=` と空白を除いた文字列を返す
fn assigned_value(segment: &str) -> Option<String> {
    let end = segment.find(';')?;
    Some(segment[..end].replace('=', "").trim().to_string())
}

/// レスポンス本文からページ情報を取り出す
pub fn parse_pagination(body: &str) -> Result<PaginationInfo, ResolutionError> {
    let (prefix, page_size_segment) =
        split_on_marker(body, PAGE_SIZE_MARKER).ok_or(ResolutionError::PageSizeMarkerNotFound)?;

    let raw = assigned_value(page_size_segment)
        .ok_or_else(|| ResolutionError::InvalidPageSize(page_size_segment.trim().to_string()))?;
    let page_size = match raw.parse::<i64>() {
        Ok(n) if n > 0 => u32::try_from(n).map_err(|_| ResolutionError::InvalidPageSize(raw))?,
        _ => return Err(ResolutionError::InvalidPageSize(raw)),
    };

    let (_, record_count_segment) = split_on_marker(prefix, RECORD_COUNT_MARKER)
        .ok_or(ResolutionError::RecordCountMarkerNotFound)?;

    let raw = assigned_value(record_count_segment).ok_or_else(|| {
        ResolutionError::InvalidRecordCount(record_count_segment.trim().to_string())
    })?;
    let record_count = raw
        .parse::<u64>()
        .map_err(|_| ResolutionError::InvalidRecordCount(raw))?;

    Ok(PaginationInfo::new(page_size, record_count))
}

pub struct PaginationResolver {
    client: SearchClient,
}

impl PaginationResolver {
    pub fn new(client: SearchClient) -> Self {
        Self { client }
    }

    /// ページ指定なしで検索し、ページ情報を取得
    pub async fn resolve(
        &self,
        currency: &str,
        window: QueryWindow,
    ) -> Result<PaginationInfo, ScraperError> {
        let body = self.client.search(&SearchForm::new(currency, window)).await?;
        let info = parse_pagination(&body)?;

        debug!(
            "Pagination for {}: page_size={}, record_count={}",
            currency, info.page_size, info.record_count
        );
        info!("Found {} pages available for {}", info.page_count, currency);
        Ok(info)
    }
}
