// ============================================================
// JSON READER
// ============================================================
// Parse JSON exports: tables of row objects, or raw value arrays

use serde_json::Value;

use crate::domain::error::{AppError, Result};
use crate::domain::table::Table;

/// Parse JSON content into a table. Accepts either an array of row
/// objects or a single object (treated as a one-row table). Parsing goes
/// through `from_str` directly so column order follows the document.
pub fn parse_table(content: &str) -> Result<Table> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        serde_json::from_str(content)
            .map_err(|e| AppError::ParseError(format!("Invalid JSON table: {e}")))
    } else {
        let row = serde_json::from_str(content)
            .map_err(|e| AppError::ParseError(format!("Invalid JSON object: {e}")))?;
        Ok(vec![row])
    }
}

/// Parse JSON content into raw values for the platform-export parsers.
/// A single object becomes a one-element list.
pub fn parse_values(content: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| AppError::ParseError(format!("Invalid JSON: {e}")))?;
    match value {
        Value::Array(items) => Ok(items),
        other => Ok(vec![other]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_of_rows() {
        let table = parse_table(r#"[{"URL": "https://a.com", "Likes": 3}]"#).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].number("Likes"), 3.0);
    }

    #[test]
    fn test_single_object_becomes_one_row_table() {
        let table = parse_table(r#"{"URL": "https://a.com"}"#).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].text("URL"), "https://a.com");
    }

    #[test]
    fn test_column_order_follows_document() {
        let table = parse_table(r#"[{"z": 1, "a": 2, "m": 3}]"#).unwrap();
        let columns: Vec<&str> = table[0].columns().collect();
        assert_eq!(columns, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        assert!(matches!(
            parse_table("not json").unwrap_err(),
            AppError::ParseError(_)
        ));
    }

    #[test]
    fn test_parse_values_wraps_single_object() {
        let values = parse_values(r#"{"ownerUsername": "alice"}"#).unwrap();
        assert_eq!(values.len(), 1);
    }
}
