// ============================================================
// ROW TYPES
// ============================================================
// Ordered string-keyed records forming in-memory tables

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::CellValue;

/// A single table row: an ordered mapping from column name to cell value.
///
/// Column order is preserved from the source document. Lookups by name
/// return a defined default instead of failing on missing columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, CellValue)>,
}

/// An ordered sequence of rows
pub type Table = Vec<Row>;

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Build a row from (column, value) pairs, preserving order
    pub fn from_pairs(pairs: Vec<(String, CellValue)>) -> Self {
        let mut row = Self::new();
        for (name, value) in pairs {
            row.set(name, value);
        }
        row
    }

    /// Look up a cell by column name
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Text view of a cell; missing columns read as empty
    pub fn text(&self, column: &str) -> String {
        self.get(column)
            .map(|v| v.as_text().into_owned())
            .unwrap_or_default()
    }

    /// Numeric view of a cell; missing columns read as 0
    pub fn number(&self, column: &str) -> f64 {
        self.get(column).map(|v| v.as_f64()).unwrap_or(0.0)
    }

    /// Whether a cell is blank (missing, empty, or whitespace-only)
    pub fn is_blank(&self, column: &str) -> bool {
        self.get(column).map(|v| v.is_blank()).unwrap_or(true)
    }

    /// Whether the row carries this column at all
    pub fn has_column(&self, column: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == column)
    }

    /// Set a cell, replacing in place if the column exists, appending otherwise
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Column names in order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// (column, value) pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no columns
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct RowVisitor;

impl<'de> Visitor<'de> for RowVisitor {
    type Value = Row;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of column names to cell values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Row, A::Error> {
        // MapAccess yields entries in document order, which keeps column order
        let mut row = Row::new();
        while let Some((name, value)) = access.next_entry::<String, CellValue>()? {
            row.set(name, value);
        }
        Ok(row)
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(RowVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Row {
        Row::from_pairs(vec![
            ("URL".to_string(), "https://example.com".into()),
            ("Likes".to_string(), 10i64.into()),
            ("Category".to_string(), CellValue::Empty),
        ])
    }

    #[test]
    fn test_lookup_defaults() {
        let row = sample_row();
        assert_eq!(row.text("URL"), "https://example.com");
        assert_eq!(row.number("Likes"), 10.0);
        assert_eq!(row.text("Missing"), "");
        assert_eq!(row.number("Missing"), 0.0);
        assert!(row.is_blank("Category"));
        assert!(row.is_blank("Missing"));
        assert!(!row.is_blank("URL"));
    }

    #[test]
    fn test_set_preserves_position() {
        let mut row = sample_row();
        row.set("Likes", 99i64);
        row.set("New", "x");
        let columns: Vec<&str> = row.columns().collect();
        assert_eq!(columns, vec!["URL", "Likes", "Category", "New"]);
        assert_eq!(row.number("Likes"), 99.0);
    }

    #[test]
    fn test_json_round_trip_keeps_column_order() {
        let json = r#"{"b": 1, "a": "x", "c": null}"#;
        let row: Row = serde_json::from_str(json).unwrap();
        let columns: Vec<&str> = row.columns().collect();
        assert_eq!(columns, vec!["b", "a", "c"]);

        let back = serde_json::to_string(&row).unwrap();
        assert_eq!(back, r#"{"b":1,"a":"x","c":null}"#);
    }
}
