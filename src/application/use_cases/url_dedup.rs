// ============================================================
// URL DEDUPLICATION ENGINE
// ============================================================
// Partition a table into kept rows and duplicates with typed reasons

use std::collections::HashSet;
use tracing::debug;

use crate::application::use_cases::normalizer::normalize_url;
use crate::application::use_cases::similarity::calculate_similarity;
use crate::domain::error::{AppError, Result};
use crate::domain::table::Row;
use crate::domain::url::{DedupOutcome, DedupStats, DuplicateReason, DuplicateRecord};

/// Length-ratio window for the similarity pre-filter. Candidates outside
/// this window against a kept URL are not compared at all. Known tradeoff:
/// URLs of very different lengths can skip a genuine similarity match.
const LENGTH_RATIO_MIN: f64 = 0.7;
const LENGTH_RATIO_MAX: f64 = 1.3;

/// Remove duplicate URLs from a table, keeping the first occurrence of each
/// logical resource and preserving input order among kept rows.
///
/// Duplicate checks run in strict priority order per row: exact normalized
/// match, then platform-ID match, then (optionally) similarity against every
/// previously kept URL within the length-ratio window, in insertion order.
///
/// Guarantees: `cleaned_data.len() + duplicate_rows.len() == table.len()`,
/// and re-running on `cleaned_data` removes nothing further.
pub fn remove_url_duplicates(
    table: &[Row],
    url_column: &str,
    similarity_threshold: f64,
    use_similarity: bool,
) -> Result<DedupOutcome> {
    if !table.is_empty() && !table.iter().any(|row| row.has_column(url_column)) {
        let available: Vec<String> = table[0].columns().map(|c| c.to_string()).collect();
        return Err(AppError::ValidationError(format!(
            "URL column '{}' not found; available columns: {}",
            url_column,
            available.join(", ")
        )));
    }

    debug!(rows = table.len(), url_column, "Deduplicating URLs");

    let mut stats = DedupStats {
        total_urls: table.len(),
        ..Default::default()
    };

    // Normalize every URL up front; the platform tally covers all rows,
    // duplicates included
    let normalized: Vec<_> = table
        .iter()
        .map(|row| normalize_url(&row.text(url_column)))
        .collect();
    for entry in &normalized {
        if let Some(platform) = entry.id.platform {
            *stats.platforms.entry(platform.to_string()).or_insert(0) += 1;
        }
    }

    let mut cleaned_data = Vec::new();
    let mut duplicate_rows = Vec::new();
    let mut seen_normalized: HashSet<String> = HashSet::new();
    let mut kept_order: Vec<String> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (row, entry) in table.iter().zip(&normalized) {
        // Rows without a usable URL are never duplicates
        if entry.normalized.is_empty() {
            cleaned_data.push(row.clone());
            continue;
        }

        let reason = if seen_normalized.contains(&entry.normalized) {
            Some(DuplicateReason::Exact)
        } else if entry.id.key().is_some_and(|key| seen_ids.contains(&key)) {
            Some(DuplicateReason::IdBased)
        } else if use_similarity {
            find_similar(&entry.normalized, &kept_order, similarity_threshold)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                match reason {
                    DuplicateReason::Exact => stats.exact_duplicates += 1,
                    DuplicateReason::IdBased => stats.id_based_duplicates += 1,
                    DuplicateReason::Similarity => stats.similarity_duplicates += 1,
                }
                duplicate_rows.push(DuplicateRecord {
                    row: row.clone(),
                    reason,
                });
            }
            None => {
                seen_normalized.insert(entry.normalized.clone());
                kept_order.push(entry.normalized.clone());
                if let Some(key) = entry.id.key() {
                    seen_ids.insert(key);
                }
                cleaned_data.push(row.clone());
            }
        }
    }

    stats.removed_total = table.len() - cleaned_data.len();
    stats.final_count = cleaned_data.len();

    debug!(
        kept = stats.final_count,
        removed = stats.removed_total,
        "Deduplication complete"
    );

    Ok(DedupOutcome {
        cleaned_data,
        duplicate_rows,
        stats,
    })
}

/// Compare a candidate against previously kept URLs in insertion order;
/// the first one crossing the threshold wins.
fn find_similar(candidate: &str, kept: &[String], threshold: f64) -> Option<DuplicateReason> {
    let candidate_len = candidate.chars().count() as f64;

    for seen in kept {
        let seen_len = seen.chars().count() as f64;
        if seen_len == 0.0 {
            continue;
        }
        let ratio = candidate_len / seen_len;
        if !(LENGTH_RATIO_MIN..=LENGTH_RATIO_MAX).contains(&ratio) {
            continue;
        }
        if calculate_similarity(candidate, seen) >= threshold {
            return Some(DuplicateReason::Similarity);
        }
    }

    None
}
