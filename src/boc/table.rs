//! 検索結果テーブルの抽出
//!
//! 行・セルはテーブル自身の子要素だけを対象にする（セル内の入れ子テーブルは数えない）。

use scraper::{ElementRef, Html};

use crate::config::DEFAULT_TABLE_INDEX;
use crate::error::ScraperError;

use super::types::{ExchangeRecord, PageRows};

fn child_elements<'a>(parent: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    parent.children().filter_map(ElementRef::wrap)
}

fn is_named(element: &ElementRef<'_>, name: &str) -> bool {
    element.value().name() == name
}

/// `<table>` 直下、または直下の `thead`/`tbody`/`tfoot` 内の `<tr>`
fn own_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let mut rows = Vec::new();
    for child in child_elements(table) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => {
                rows.extend(child_elements(child).filter(|e| is_named(e, "tr")))
            }
            _ => {}
        }
    }
    rows
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// 文書順で `table_index` 番目（0始まり）の `<table>` からレート行を取り出す。
/// 位置はサイトのレイアウトに依存する。
#[derive(Debug, Clone, Copy)]
pub struct TableExtractor {
    table_index: usize,
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_INDEX)
    }
}

impl TableExtractor {
    pub fn new(table_index: usize) -> Self {
        Self { table_index }
    }

    pub fn extract(&self, html: &str) -> Result<PageRows, ScraperError> {
        let document = Html::parse_document(html);
        self.extract_from(&document)
    }

    pub fn extract_from(&self, document: &Html) -> Result<PageRows, ScraperError> {
        let table = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|e| is_named(e, "table"))
            .nth(self.table_index)
            .ok_or(ScraperError::TableNotFound {
                index: self.table_index,
            })?;

        // 先頭行はヘッダー
        let rows = own_rows(table);
        if rows.len() <= 1 {
            return Ok(PageRows::NoData);
        }

        let mut records = Vec::with_capacity(rows.len() - 1);
        for (i, row) in rows.into_iter().skip(1).enumerate() {
            let cells: Vec<String> = child_elements(row)
                .filter(|e| is_named(e, "td"))
                .map(cell_text)
                .collect();
            let found = cells.len();
            let cells: [String; ExchangeRecord::CELL_COUNT] =
                cells.try_into().map_err(|_| ScraperError::Shape {
                    row: i + 1,
                    found,
                    expected: ExchangeRecord::CELL_COUNT,
                })?;
            records.push(ExchangeRecord::from_cells(cells));
        }

        Ok(PageRows::Records(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{rates_page, record};

    #[test]
    fn test_extracts_trimmed_rows_in_order() {
        let expected = vec![record("USD", 1), record("USD", 2), record("USD", 3)];
        let rows = TableExtractor::default()
            .extract(&rates_page(&expected))
            .unwrap();

        assert_eq!(rows, PageRows::Records(expected));
    }

    #[test]
    fn test_header_only_table_is_no_data() {
        let rows = TableExtractor::default().extract(&rates_page(&[])).unwrap();
        assert_eq!(rows, PageRows::NoData);
    }

    #[test]
    fn test_short_row_is_shape_error() {
        let html = "<table></table><table>\
                    <tr><th>h</th></tr>\
                    <tr><td>1</td><td>2</td><td>3</td><td>4</td><td>5</td><td>6</td><td>7</td></tr>\
                    <tr><td>1</td><td>2</td><td>3</td><td>4</td><td>5</td><td>6</td></tr>\
                    </table>";
        let err = TableExtractor::default().extract(html).unwrap_err();

        assert!(matches!(
            err,
            ScraperError::Shape {
                row: 2,
                found: 6,
                expected: 7
            }
        ));
    }

    #[test]
    fn test_nested_table_in_cell_is_not_counted() {
        let html = "<table></table><table>\
                    <thead><tr><th>h</th></tr></thead>\
                    <tbody>\
                    <tr><td>USD</td><td>1</td><td>2</td><td>3</td><td>4</td><td>5</td>\
                    <td>2024.03.01<table><tr><td>x</td><td>y</td></tr></table></td></tr>\
                    </tbody></table>";
        let rows = TableExtractor::default().extract(html).unwrap();

        let PageRows::Records(records) = &rows else {
            panic!("expected records, got {:?}", rows);
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].currency_name, "USD");
        assert_eq!(records[0].middle_rate, "5");
    }

    #[test]
    fn test_missing_table_is_error() {
        let err = TableExtractor::default()
            .extract("<html><body><table><tr><td>only one</td></tr></table></body></html>")
            .unwrap_err();
        assert!(matches!(err, ScraperError::TableNotFound { index: 1 }));
    }

    #[test]
    fn test_custom_table_index() {
        let html = rates_page(&[record("EUR", 4)])
            .replace("<table><tr><td>search form</td></tr></table>", "");
        let rows = TableExtractor::new(0).extract(&html).unwrap();
        assert_eq!(rows, PageRows::Records(vec![record("EUR", 4)]));
    }
}
