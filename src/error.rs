use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("通信エラー: {0}")]
    Transport(#[from] TransportError),

    #[error("ページ情報の解析エラー: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("テーブルが見つかりません: index={index}")]
    TableNotFound { index: usize },

    #[error("行の形式が不正です: row={row}, cells={found} (期待値: {expected})")]
    Shape {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("通貨リスト取得エラー: {0}")]
    Catalog(String),

    #[error("セレクタが不正です: {0}")]
    InvalidSelector(String),

    #[error("CSV出力エラー: {0}")]
    Export(#[from] csv::Error),

    #[error("ファイル操作エラー: {0}")]
    FileIO(#[from] std::io::Error),

    #[error("設定エラー: {0}")]
    Config(String),
}

/// 埋め込みスクリプトからページ情報を取り出せなかった理由
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("m_nPageSize が見つかりません")]
    PageSizeMarkerNotFound,

    #[error("m_nPageSize の値が不正です: {0:?}")]
    InvalidPageSize(String),

    #[error("m_nRecordCount が見つかりません")]
    RecordCountMarkerNotFound,

    #[error("m_nRecordCount の値が不正です: {0:?}")]
    InvalidRecordCount(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Status(u16),
    Body,
    Other,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// タイムアウト・接続失敗・5xx のみ再試行対象
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            TransportErrorKind::Timeout | TransportErrorKind::Connect => true,
            TransportErrorKind::Status(code) => code >= 500,
            TransportErrorKind::Body | TransportErrorKind::Other => false,
        }
    }
}
