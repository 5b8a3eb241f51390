//! 為替レート関連の型定義

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ScraperError;

/// 日付の書式（検索フォーム・ファイル名共通）
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 1行分の為替レート（値はすべてセルのテキストをトリムしたもの）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRecord {
    #[serde(rename = "CurrencyName")]
    pub currency_name: String,
    #[serde(rename = "BuyingRate")]
    pub buying_rate: String,
    #[serde(rename = "CashBuyingRate")]
    pub cash_buying_rate: String,
    #[serde(rename = "SellingRate")]
    pub selling_rate: String,
    #[serde(rename = "CashSellingRate")]
    pub cash_selling_rate: String,
    #[serde(rename = "MiddleRate")]
    pub middle_rate: String,
    #[serde(rename = "PubTime")]
    pub pub_time: String,
}

impl ExchangeRecord {
    /// テーブル1行あたりのセル数
    pub const CELL_COUNT: usize = 7;

    /// セル値の配列から構築（順序はテーブルの列順）
    pub fn from_cells(cells: [String; Self::CELL_COUNT]) -> Self {
        let [currency_name, buying_rate, cash_buying_rate, selling_rate, cash_selling_rate, middle_rate, pub_time] =
            cells;
        Self {
            currency_name,
            buying_rate,
            cash_buying_rate,
            selling_rate,
            cash_selling_rate,
            middle_rate,
            pub_time,
        }
    }
}

/// ページ情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    pub page_size: u32,
    pub record_count: u64,
    pub page_count: u64,
}

impl PaginationInfo {
    /// `page_size` は正であること（呼び出し側で検証済み）
    pub fn new(page_size: u32, record_count: u64) -> Self {
        Self {
            page_size,
            record_count,
            page_count: record_count.div_ceil(u64::from(page_size)),
        }
    }
}

/// 取得期間（終了日から `days` 日遡る）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl QueryWindow {
    /// 開始日が表現可能な日付範囲を外れる場合は `Config` エラー
    pub fn trailing(end: NaiveDate, days: u32) -> Result<Self, ScraperError> {
        let start = end
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or_else(|| {
                ScraperError::Config(format!("{} days before {} is out of range", days, end))
            })?;
        Ok(Self { start, end })
    }

    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    /// `<key>_<start>_<end>`
    pub fn file_stem(&self, key: &str) -> String {
        format!("{}_{}_{}", key, self.start_str(), self.end_str())
    }
}

/// 1ページ分の抽出結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRows {
    Records(Vec<ExchangeRecord>),
    /// ヘッダー行しかない（このページはスキップ）
    NoData,
}
