// ============================================================
// POST MATRIX AGGREGATOR
// ============================================================
// Count posts by region, source, and final category across files

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::table::{Row, Table};

/// One uploaded file: its parsed rows plus the label it arrived under
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub table: Table,
    pub source_label: String,
}

/// Region name embedded between the "Final" and "Data" markers,
/// e.g. "Final Vietnam Data_filled" -> "Vietnam"
static REGION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Final\s*(.+?)\s*Data").unwrap());

/// Derive a region name from a file's source label; `Unknown` when the
/// label does not follow the naming convention.
pub fn infer_region_from_label(label: &str) -> String {
    REGION_PATTERN
        .captures(label)
        .and_then(|captures| captures.get(1))
        .map(|region| region.as_str().trim().to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Build the post matrix: counts grouped by (Region, Source, Final
/// Category), summed exactly across files. Missing Source and Final
/// Category values fall back to their sentinel labels. Output rows appear
/// in first-seen group order.
pub fn build_post_matrix(files: &[SourceFile]) -> Table {
    let mut order: Vec<(String, String, String)> = Vec::new();
    let mut counts: HashMap<(String, String, String), usize> = HashMap::new();

    for file in files {
        let region = infer_region_from_label(&file.source_label);
        for row in &file.table {
            let source = match row.is_blank("Source") {
                true => "Unknown".to_string(),
                false => row.text("Source"),
            };
            let category = match row.is_blank("Final Category") {
                true => "Not Specified".to_string(),
                false => row.text("Final Category"),
            };

            let key = (region.clone(), source, category);
            match counts.get_mut(&key) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(key.clone(), 1);
                    order.push(key);
                }
            }
        }
    }

    order
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            let (region, source, category) = key;
            Row::from_pairs(vec![
                ("Region".to_string(), region.into()),
                ("Source".to_string(), source.into()),
                ("Final Category".to_string(), category.into()),
                ("Post Count".to_string(), count.into()),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_row(source: &str, category: &str) -> Row {
        Row::from_pairs(vec![
            ("Source".to_string(), source.into()),
            ("Final Category".to_string(), category.into()),
        ])
    }

    #[test]
    fn test_region_inference() {
        assert_eq!(infer_region_from_label("Final Vietnam Data"), "Vietnam");
        assert_eq!(
            infer_region_from_label("final  Sri Lanka   data_filled.xlsx"),
            "Sri Lanka"
        );
        assert_eq!(infer_region_from_label("random_export.csv"), "Unknown");
    }

    #[test]
    fn test_counts_sum_across_files() {
        let files = vec![
            SourceFile {
                table: vec![post_row("IG", "X"), post_row("IG", "X"), post_row("IG", "X")],
                source_label: "Final Vietnam Data".to_string(),
            },
            SourceFile {
                table: vec![post_row("IG", "X"), post_row("IG", "X"), post_row("IG", "X")],
                source_label: "Final Vietnam Data_filled".to_string(),
            },
        ];

        let matrix = build_post_matrix(&files);
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix[0].text("Region"), "Vietnam");
        assert_eq!(matrix[0].text("Source"), "IG");
        assert_eq!(matrix[0].text("Final Category"), "X");
        assert_eq!(matrix[0].number("Post Count"), 6.0);
    }

    #[test]
    fn test_sentinel_defaults() {
        let files = vec![SourceFile {
            table: vec![Row::new()],
            source_label: "export".to_string(),
        }];

        let matrix = build_post_matrix(&files);
        assert_eq!(matrix[0].text("Region"), "Unknown");
        assert_eq!(matrix[0].text("Source"), "Unknown");
        assert_eq!(matrix[0].text("Final Category"), "Not Specified");
        assert_eq!(matrix[0].number("Post Count"), 1.0);
    }

    #[test]
    fn test_distinct_groups_keep_first_seen_order() {
        let files = vec![SourceFile {
            table: vec![
                post_row("IG", "B"),
                post_row("TT", "A"),
                post_row("IG", "B"),
            ],
            source_label: "Final India Data".to_string(),
        }];

        let matrix = build_post_matrix(&files);
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0].text("Source"), "IG");
        assert_eq!(matrix[0].number("Post Count"), 2.0);
        assert_eq!(matrix[1].text("Source"), "TT");
        assert_eq!(matrix[1].number("Post Count"), 1.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_post_matrix(&[]).is_empty());
    }
}
