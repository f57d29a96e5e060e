// ============================================================
// MISSING POST DIFF
// ============================================================
// Reference rows whose URL never made it into the final table

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::table::Row;

/// Statistics for one reference-vs-final comparison
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingPostStats {
    pub total_in_reference: usize,
    pub total_in_final: usize,
    pub missing_posts: usize,
    /// Final row count as a percentage of the reference, 2 dp
    pub coverage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingPostsOutcome {
    pub missing_posts: Vec<Row>,
    pub stats: MissingPostStats,
}

/// Return the reference rows whose trimmed URL does not appear in the
/// final table. A reference row with a blank URL can never be matched,
/// so it counts as missing.
pub fn find_missing_posts(reference_table: &[Row], final_table: &[Row]) -> MissingPostsOutcome {
    let final_urls: HashSet<String> = final_table
        .iter()
        .map(|row| row.text("URL").trim().to_string())
        .filter(|url| !url.is_empty())
        .collect();

    let missing_posts: Vec<Row> = reference_table
        .iter()
        .filter(|row| {
            let url = row.text("URL");
            let url = url.trim();
            url.is_empty() || !final_urls.contains(url)
        })
        .cloned()
        .collect();

    let coverage = match final_table.is_empty() || reference_table.is_empty() {
        true => 0.0,
        false => {
            let ratio = final_table.len() as f64 / reference_table.len() as f64;
            (ratio * 100.0 * 100.0).round() / 100.0
        }
    };

    let stats = MissingPostStats {
        total_in_reference: reference_table.len(),
        total_in_final: final_table.len(),
        missing_posts: missing_posts.len(),
        coverage,
    };

    MissingPostsOutcome {
        missing_posts,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_row(url: &str) -> Row {
        Row::from_pairs(vec![("URL".to_string(), url.into())])
    }

    #[test]
    fn test_missing_rows_detected() {
        let reference = vec![
            url_row("https://a.com/1"),
            url_row("https://a.com/2"),
            url_row("https://a.com/3"),
        ];
        let final_table = vec![url_row("https://a.com/1"), url_row("https://a.com/3")];

        let result = find_missing_posts(&reference, &final_table);
        assert_eq!(result.missing_posts.len(), 1);
        assert_eq!(result.missing_posts[0].text("URL"), "https://a.com/2");
        assert_eq!(result.stats.total_in_reference, 3);
        assert_eq!(result.stats.total_in_final, 2);
        // 2/3 * 100 rounded to 2 dp
        assert_eq!(result.stats.coverage, 66.67);
    }

    #[test]
    fn test_urls_matched_after_trimming() {
        let reference = vec![url_row("  https://a.com/1  ")];
        let final_table = vec![url_row("https://a.com/1")];
        let result = find_missing_posts(&reference, &final_table);
        assert!(result.missing_posts.is_empty());
    }

    #[test]
    fn test_blank_reference_urls_count_as_missing() {
        let reference = vec![url_row(""), url_row("   ")];
        let final_table = vec![url_row("https://a.com/1")];
        let result = find_missing_posts(&reference, &final_table);
        assert_eq!(result.missing_posts.len(), 2);
    }

    #[test]
    fn test_empty_final_table() {
        let reference = vec![url_row("https://a.com/1")];
        let result = find_missing_posts(&reference, &[]);
        assert_eq!(result.missing_posts.len(), 1);
        assert_eq!(result.stats.coverage, 0.0);
    }
}
