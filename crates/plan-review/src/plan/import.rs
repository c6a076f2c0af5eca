use std::collections::BTreeMap;
use std::io::Read;

use super::submission::{CellValue, TableValue};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("unable to read table csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("table csv has no header row")]
    MissingHeaders,
}

/// Build a table answer from CSV: the header row names the columns, blank
/// cells stay empty, and numeric-looking cells become numbers.
pub fn table_from_csv<R: Read>(reader: R) -> Result<TableValue, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.iter().all(|header| header.is_empty()) {
        return Err(ImportError::MissingHeaders);
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row: BTreeMap<String, CellValue> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, raw)| (header.clone(), cell_from(raw)))
            .collect();
        rows.push(row);
    }

    Ok(TableValue { headers, rows })
}

fn cell_from(raw: &str) -> CellValue {
    if raw.is_empty() {
        return CellValue::Null;
    }
    match raw.parse::<f64>() {
        Ok(number) if number.is_finite() => CellValue::Number(number),
        _ => CellValue::Text(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imports_rows_with_typed_cells() {
        let csv = "year,revenue,notes\n2025,12000,launch\n2026,,\n";

        let table = table_from_csv(csv.as_bytes()).expect("table imports");

        assert_eq!(table.headers, vec!["year", "revenue", "notes"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0]["revenue"], CellValue::Number(12000.0));
        assert_eq!(table.rows[0]["notes"], CellValue::Text("launch".to_string()));
        assert_eq!(table.rows[1]["revenue"], CellValue::Null);
        assert_eq!(table.fill_counts(), (4, 6));
    }

    #[test]
    fn short_records_leave_missing_cells_empty() {
        let table = table_from_csv("year,revenue\n2025\n".as_bytes()).expect("table imports");

        assert_eq!(table.rows[0].len(), 1);
        assert_eq!(table.fill_counts(), (1, 2));
    }

    #[test]
    fn empty_input_has_no_headers() {
        let err = table_from_csv("".as_bytes()).expect_err("no header row");
        assert!(matches!(err, ImportError::MissingHeaders));
    }
}
