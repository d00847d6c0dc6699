//! Load the reference period table from CSV

use super::{ReferenceRow, ReferenceTable};
use crate::error::{PlannerError, Result};
use csv::Reader;
use std::path::Path;

/// Default location of the reference table
pub const DEFAULT_REFERENCE_PATH: &str = "data/reference.csv";

/// Raw CSV row; only `Period` is required
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Period")]
    period: String,
    #[serde(rename = "MediaSpend", default)]
    media_spend: Option<f64>,
    #[serde(rename = "Reach", default)]
    reach: Option<f64>,
}

impl CsvRow {
    fn to_reference_row(self, line: usize) -> Result<ReferenceRow> {
        let label = self.period.trim().to_string();
        if label.is_empty() {
            return Err(PlannerError::ReferenceData(format!("row {} has an empty Period", line)));
        }

        Ok(ReferenceRow {
            label,
            media_spend: self.media_spend,
            reach: self.reach,
        })
    }
}

/// Load the reference table from a CSV file
///
/// A missing or unreadable file is reported as `ReferenceData` so the
/// caller can stop before rendering anything.
pub fn load_reference<P: AsRef<Path>>(path: P) -> Result<ReferenceTable> {
    let path = path.as_ref();
    let reader = Reader::from_path(path)
        .map_err(|e| PlannerError::ReferenceData(format!("{}: {}", path.display(), e)))?;

    let table = read_rows(reader)?;
    log::info!("loaded {} reference periods from {}", table.len(), path.display());
    Ok(table)
}

/// Load the reference table from any reader (e.g., string buffer)
pub fn load_reference_from_reader<R: std::io::Read>(reader: R) -> Result<ReferenceTable> {
    read_rows(Reader::from_reader(reader))
}

/// Load the reference table from the default location
pub fn load_default_reference() -> Result<ReferenceTable> {
    load_reference(DEFAULT_REFERENCE_PATH)
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<ReferenceTable> {
    let mut rows = Vec::new();

    for (i, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        rows.push(row.to_reference_row(i + 1)?);
    }

    if rows.is_empty() {
        return Err(PlannerError::ReferenceData("reference table has no rows".to_string()));
    }

    Ok(ReferenceTable { rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_spend_table() {
        let csv = "Period,MediaSpend\n2024,32000000\n2025-26,30000000\n";
        let table = load_reference_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.labels(), vec!["2024", "2025-26"]);
        assert_eq!(table.spend_or(0.0), vec![32_000_000.0, 30_000_000.0]);
        assert!(table.reach().is_none());
    }

    #[test]
    fn test_load_reach_table() {
        let csv = "Period,Reach\nJan,4111111\nFeb,7400000\n";
        let table = load_reference_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.reach().unwrap(), vec![4_111_111.0, 7_400_000.0]);
        assert_eq!(table.spend_or(5.0), vec![5.0, 5.0]);
    }

    #[test]
    fn test_missing_spend_cells_use_default() {
        let csv = "Period,MediaSpend\n2024,100\n2025-26,\n";
        let table = load_reference_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.spend_or(7.0), vec![100.0, 7.0]);
    }

    #[test]
    fn test_non_numeric_spend_rejected() {
        let csv = "Period,MediaSpend\n2024,lots\n";
        let err = load_reference_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, PlannerError::CsvError(_)));
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = load_reference_from_reader("Period,MediaSpend\n".as_bytes()).unwrap_err();
        assert!(matches!(err, PlannerError::ReferenceData(_)));
    }

    #[test]
    fn test_missing_file_is_reference_error() {
        let err = load_reference("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, PlannerError::ReferenceData(_)));
        assert!(err.to_string().contains("does/not/exist.csv"));
    }
}
