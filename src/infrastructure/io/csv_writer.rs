// ============================================================
// CSV WRITER
// ============================================================
// Render row tables back to CSV for download

use crate::domain::error::{AppError, Result};
use crate::domain::table::Row;

/// Render a table as CSV text. The header is the union of all column
/// names in first-seen order, so rows with differing columns still line up.
pub fn table_to_csv(table: &[Row]) -> Result<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in table {
        for name in row.columns() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.to_string());
            }
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&columns)
        .map_err(|e| AppError::Internal(format!("Failed to write CSV header: {e}")))?;

    for row in table {
        let record: Vec<String> = columns.iter().map(|column| row.text(column)).collect();
        writer
            .write_record(&record)
            .map_err(|e| AppError::Internal(format!("Failed to write CSV row: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush CSV writer: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("Invalid CSV output: {e}")))
}
