// ============================================================
// CELL VALUES
// ============================================================
// Scalar values held by table cells: text, number, or empty

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// A single scalar cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Free text
    Text(String),
    /// Numeric value (integers are carried as f64)
    Number(f64),
    /// Absent / null cell
    Empty,
}

impl CellValue {
    /// Build a text cell, mapping whitespace-only input to `Empty`
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }

    /// Whether this cell counts as blank (empty or whitespace-only text)
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Render the cell as text; numbers drop a trailing `.0`
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Cow::Owned(format!("{}", *n as i64))
                } else {
                    Cow::Owned(n.to_string())
                }
            }
            CellValue::Empty => Cow::Borrowed(""),
        }
    }

    /// Numeric view of the cell; unparseable text and empty cells read as 0
    pub fn as_f64(&self) -> f64 {
        match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            CellValue::Empty => 0.0,
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(n) => CellValue::Number(n),
            None => CellValue::Empty,
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            CellValue::Empty => serializer.serialize_none(),
        }
    }
}

struct CellValueVisitor;

impl<'de> Visitor<'de> for CellValueVisitor {
    type Value = CellValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number, boolean, or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<CellValue, E> {
        Ok(CellValue::text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<CellValue, E> {
        Ok(CellValue::text(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<CellValue, E> {
        Ok(CellValue::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<CellValue, E> {
        Ok(CellValue::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<CellValue, E> {
        Ok(CellValue::Number(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<CellValue, E> {
        // Booleans from raw JSON exports degrade to text
        Ok(CellValue::Text(if v { "true" } else { "false" }.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<CellValue, E> {
        Ok(CellValue::Empty)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<CellValue, E> {
        Ok(CellValue::Empty)
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<CellValue, D::Error> {
        deserializer.deserialize_any(CellValueVisitor)
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(CellValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_detection() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::text("   ").is_blank());
        assert!(!CellValue::text("x").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn test_numeric_view() {
        assert_eq!(CellValue::Number(3.5).as_f64(), 3.5);
        assert_eq!(CellValue::text("42").as_f64(), 42.0);
        assert_eq!(CellValue::text("n/a").as_f64(), 0.0);
        assert_eq!(CellValue::Empty.as_f64(), 0.0);
    }

    #[test]
    fn test_text_view_drops_trailing_zero() {
        assert_eq!(CellValue::Number(7.0).as_text(), "7");
        assert_eq!(CellValue::Number(7.25).as_text(), "7.25");
    }

    #[test]
    fn test_json_round_trip() {
        let json = r#"["hello", 12, 1.5, null, true]"#;
        let values: Vec<CellValue> = serde_json::from_str(json).unwrap();
        assert_eq!(values[0], CellValue::Text("hello".to_string()));
        assert_eq!(values[1], CellValue::Number(12.0));
        assert_eq!(values[2], CellValue::Number(1.5));
        assert_eq!(values[3], CellValue::Empty);
        assert_eq!(values[4], CellValue::Text("true".to_string()));

        let back = serde_json::to_string(&values[..4]).unwrap();
        assert_eq!(back, r#"["hello",12,1.5,null]"#);
    }
}
