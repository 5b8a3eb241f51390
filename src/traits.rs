use async_trait::async_trait;
use std::path::PathBuf;

use crate::boc::ExchangeRecord;
use crate::error::{ScraperError, TransportError};
use crate::transport::HttpRequest;

#[async_trait]
pub trait Transport: Send + Sync {
    /// リクエストを1回送信し、レスポンス本文を返す
    async fn send(&self, request: HttpRequest) -> Result<String, TransportError>;
}

pub trait Exporter: Send + Sync {
    /// レコードを `file_stem` に対応するファイルへ書き出し、そのパスを返す
    fn export(&self, records: &[ExchangeRecord], file_stem: &str)
        -> Result<PathBuf, ScraperError>;
}
