// ============================================================
// EXCEL READER
// ============================================================
// Read the first worksheet of an XLSX workbook into a row table

use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, Row, Table};

/// Read the first worksheet: row one is the header, every following row
/// becomes a table row keyed by those headers.
pub fn read_first_worksheet(path: &Path) -> Result<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| AppError::IoError(format!("Failed to open Excel file: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::ParseError("No worksheet found".to_string()))?
        .map_err(|e| AppError::ParseError(format!("Failed to read Excel range: {e}")))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row.iter().map(cell_text).collect();

    let table = rows
        .map(|cells| {
            let mut row = Row::new();
            for (idx, header) in headers.iter().enumerate() {
                if header.is_empty() {
                    continue;
                }
                let value = cells.get(idx).map(cell_value).unwrap_or(CellValue::Empty);
                row.set(header.clone(), value);
            }
            row
        })
        .collect();

    Ok(table)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(if *b { "true" } else { "false" }.to_string()),
        other => CellValue::text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_mapping() {
        assert_eq!(cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(
            cell_value(&Data::String("  x ".to_string())),
            CellValue::Text("  x ".to_string())
        );
        assert_eq!(cell_value(&Data::Float(2.5)), CellValue::Number(2.5));
        assert_eq!(cell_value(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(
            cell_value(&Data::Bool(true)),
            CellValue::Text("true".to_string())
        );
    }

    #[test]
    fn test_header_text_trimmed() {
        assert_eq!(cell_text(&Data::String(" URL ".to_string())), "URL");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}
