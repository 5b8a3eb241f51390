use std::path::PathBuf;

use tracing::info;

use crate::boc::ExchangeRecord;
use crate::error::ScraperError;
use crate::traits::Exporter;

/// `<output_dir>/<file_stem>.csv` にヘッダー付きで書き出す
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl Exporter for CsvExporter {
    fn export(
        &self,
        records: &[ExchangeRecord],
        file_stem: &str,
    ) -> Result<PathBuf, ScraperError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{}.csv", file_stem));

        info!("Writing to file: {}", path.display());
        let mut writer = csv::Writer::from_path(&path)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;

    #[test]
    fn test_export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path().join("nested"));

        let path = exporter
            .export(&[record("USD", 1), record("USD", 2)], "USD_2024-02-28_2024-03-01")
            .unwrap();

        assert_eq!(
            path,
            dir.path().join("nested").join("USD_2024-02-28_2024-03-01.csv")
        );
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "CurrencyName,BuyingRate,CashBuyingRate,SellingRate,CashSellingRate,MiddleRate,PubTime"
        );
        assert_eq!(
            lines[1],
            "USD,1.01,1.02,1.03,1.04,1.05,2024.03.01 10:01:00"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_export_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path());
        let records = vec![record("Pound, Sterling", 3)];

        let path = exporter.export(&records, "GBP").unwrap();

        let mut reader = csv::Reader::from_path(path).unwrap();
        let read: Vec<ExchangeRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(read, records);
    }
}
