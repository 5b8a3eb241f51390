//! テスト用の共通ヘルパー

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::boc::{ExchangeRecord, QueryWindow};
use crate::error::{TransportError, TransportErrorKind};
use crate::traits::Transport;
use crate::transport::{HttpMethod, HttpRequest};

pub const TEST_URL: &str = "http://rates.test/search";

pub fn test_window() -> QueryWindow {
    QueryWindow::trailing(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 2).unwrap()
}

/// リクエスト本文ごとに応答を返すトランスポート。未登録のリクエストは接続エラー。
#[derive(Default)]
pub struct ScriptedTransport {
    routes: HashMap<(HttpMethod, Option<String>), Result<String, TransportError>>,
    calls: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get(mut self, body: impl Into<String>) -> Self {
        self.routes.insert((HttpMethod::Get, None), Ok(body.into()));
        self
    }

    pub fn on_post(mut self, form: impl Into<String>, body: impl Into<String>) -> Self {
        self.routes
            .insert((HttpMethod::Post, Some(form.into())), Ok(body.into()));
        self
    }

    pub fn fail_post(mut self, form: impl Into<String>, kind: TransportErrorKind) -> Self {
        self.routes.insert(
            (HttpMethod::Post, Some(form.into())),
            Err(TransportError::new(kind, "scripted failure")),
        );
        self
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<String, TransportError> {
        let key = (request.method, request.body.clone());
        self.calls.lock().unwrap().push(request);
        self.routes.get(&key).cloned().unwrap_or_else(|| {
            Err(TransportError::new(
                TransportErrorKind::Connect,
                format!("no route for {:?}", key),
            ))
        })
    }
}

/// `m_nRecordCount` と `m_nPageSize` を埋め込んだ検索結果ページ
pub fn pagination_page(record_count: &str, page_size: &str) -> String {
    format!(
        "<html><body><table><tr><td>form</td></tr></table>\
         <script>var m_nRecordCount = {};\nvar m_nPageSize = {};\n</script></body></html>",
        record_count, page_size
    )
}

pub fn record(name: &str, n: usize) -> ExchangeRecord {
    ExchangeRecord {
        currency_name: name.to_string(),
        buying_rate: format!("{}.01", n),
        cash_buying_rate: format!("{}.02", n),
        selling_rate: format!("{}.03", n),
        cash_selling_rate: format!("{}.04", n),
        middle_rate: format!("{}.05", n),
        pub_time: format!("2024.03.01 10:{:02}:00", n),
    }
}

/// 2番目のテーブルにレート行を持つページ
pub fn rates_page(records: &[ExchangeRecord]) -> String {
    let rows: String = records
        .iter()
        .map(|r| {
            format!(
                "<tr><td> {} </td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>\n{}\n</td></tr>",
                r.currency_name,
                r.buying_rate,
                r.cash_buying_rate,
                r.selling_rate,
                r.cash_selling_rate,
                r.middle_rate,
                r.pub_time
            )
        })
        .collect();

    format!(
        "<html><body>\
         <table><tr><td>search form</td></tr></table>\
         <table>\
         <tr><th>Currency Name</th><th>Buying Rate</th><th>Cash Buying Rate</th>\
         <th>Selling Rate</th><th>Cash Selling Rate</th><th>Middle Rate</th><th>Pub Time</th></tr>\
         {}\
         </table></body></html>",
        rows
    )
}
