// ============================================================
// REFERENCE FILL ENGINE
// ============================================================
// Fill blank cells in a main table from a reference table joined by URL

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::domain::table::{CellValue, Row};

/// Join key column correlating main and reference rows
const URL_COLUMN: &str = "URL";

/// Columns filled when the caller does not specify their own list
pub const DEFAULT_FILLABLE_COLUMNS: &[&str] = &["Category", "Brand", "Content Type"];

/// Statistics for one reference-fill run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillStats {
    pub total_urls: usize,
    pub matched_urls: usize,
    pub unmatched_urls: usize,
    /// Cells actually filled, per column
    pub updated_cells: BTreeMap<String, usize>,
}

/// Result of a reference-fill run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillOutcome {
    pub table: Vec<Row>,
    pub stats: FillStats,
}

/// Fill blank cells in `main_table` from `reference_table`, joined on the
/// URL column. The first reference occurrence per URL wins; later
/// duplicates are ignored silently. Non-blank cells are never overwritten.
pub fn fill_columns_from_reference(
    main_table: &[Row],
    reference_table: &[Row],
    fillable_columns: &[String],
) -> FillOutcome {
    // First occurrence per URL wins in the reference
    let mut reference: HashMap<String, Vec<(String, CellValue)>> = HashMap::new();
    for row in reference_table {
        let url = row.text(URL_COLUMN);
        if url.trim().is_empty() || reference.contains_key(&url) {
            continue;
        }
        let values: Vec<(String, CellValue)> = fillable_columns
            .iter()
            .filter_map(|column| {
                row.get(column)
                    .filter(|value| !value.is_blank())
                    .map(|value| (column.clone(), value.clone()))
            })
            .collect();
        reference.insert(url, values);
    }

    let mut stats = FillStats {
        total_urls: main_table.len(),
        ..Default::default()
    };
    for column in fillable_columns {
        stats.updated_cells.insert(column.clone(), 0);
    }

    let table: Vec<Row> = main_table
        .iter()
        .map(|row| {
            let mut updated = row.clone();
            // Make sure target columns exist even when nothing matches
            for column in fillable_columns {
                if !updated.has_column(column) {
                    updated.set(column.clone(), CellValue::Empty);
                }
            }

            let url = row.text(URL_COLUMN);
            let Some(values) = reference.get(&url) else {
                return updated;
            };
            stats.matched_urls += 1;

            for (column, value) in values {
                if updated.is_blank(column) {
                    updated.set(column.clone(), value.clone());
                    *stats.updated_cells.entry(column.clone()).or_insert(0) += 1;
                }
            }
            updated
        })
        .collect();

    stats.unmatched_urls = stats.total_urls - stats.matched_urls;

    FillOutcome { table, stats }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fillable() -> Vec<String> {
        DEFAULT_FILLABLE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    fn reference_row(url: &str, category: &str, brand: &str) -> Row {
        Row::from_pairs(vec![
            ("URL".to_string(), url.into()),
            ("Category".to_string(), category.into()),
            ("Brand".to_string(), brand.into()),
        ])
    }

    #[test]
    fn test_fills_only_blank_cells() {
        let main = vec![Row::from_pairs(vec![
            ("URL".to_string(), "https://a.com/1".into()),
            ("Category".to_string(), "Existing".into()),
            ("Brand".to_string(), CellValue::Empty),
        ])];
        let reference = vec![reference_row("https://a.com/1", "FromRef", "BrandRef")];

        let result = fill_columns_from_reference(&main, &reference, &fillable());
        // Pre-existing value survives even though the reference differs
        assert_eq!(result.table[0].text("Category"), "Existing");
        assert_eq!(result.table[0].text("Brand"), "BrandRef");
        assert_eq!(result.stats.matched_urls, 1);
        assert_eq!(result.stats.updated_cells["Brand"], 1);
        assert_eq!(result.stats.updated_cells["Category"], 0);
    }

    #[test]
    fn test_first_reference_occurrence_wins() {
        let main = vec![Row::from_pairs(vec![
            ("URL".to_string(), "https://a.com/1".into()),
            ("Category".to_string(), CellValue::Empty),
        ])];
        let reference = vec![
            reference_row("https://a.com/1", "First", "X"),
            reference_row("https://a.com/1", "Second", "Y"),
        ];

        let result = fill_columns_from_reference(&main, &reference, &fillable());
        assert_eq!(result.table[0].text("Category"), "First");
    }

    #[test]
    fn test_unmatched_rows_counted() {
        let main = vec![
            Row::from_pairs(vec![("URL".to_string(), "https://a.com/1".into())]),
            Row::from_pairs(vec![("URL".to_string(), "https://a.com/2".into())]),
        ];
        let reference = vec![reference_row("https://a.com/1", "Cat", "Brand")];

        let result = fill_columns_from_reference(&main, &reference, &fillable());
        assert_eq!(result.stats.matched_urls, 1);
        assert_eq!(result.stats.unmatched_urls, 1);
        // Fillable columns exist on every output row
        assert!(result.table[1].has_column("Content Type"));
    }

    #[test]
    fn test_empty_tables() {
        let result = fill_columns_from_reference(&[], &[], &fillable());
        assert!(result.table.is_empty());
        assert_eq!(result.stats.total_urls, 0);
        assert_eq!(result.stats.unmatched_urls, 0);
    }
}
