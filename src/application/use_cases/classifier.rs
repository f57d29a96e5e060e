// ============================================================
// KEYWORD CLASSIFIER
// ============================================================
// Compile a category -> keyword map into ordered matchers and
// assign category labels to free text

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::application::use_cases::normalizer::normalize_text;
use crate::domain::keywords::{CategoryKeywordMap, NOT_SPECIFIED, SENTINEL_VALUES};
use crate::domain::table::Row;

/// Column written by `ensure_final_category_column`
pub const FINAL_CATEGORY_COLUMN: &str = "Final Category";

/// Characters that mark a keyword as a raw regex fragment rather than a
/// literal word. Literals get escaped and wrapped in word boundaries;
/// fragments pass through so operators can express optional separators.
const REGEX_METACHARS: &str = "\\[]()|?*+{}^$.-";

/// Keyword classifier with an explicit compiled-matcher cache.
///
/// The cache is keyed by the serialized keyword map, so a structurally
/// identical map never recompiles and any content change invalidates it.
/// Owned by the caller rather than living in module state, which keeps
/// classification runs isolated from each other.
#[derive(Debug, Default)]
pub struct KeywordClassifier {
    cached_fingerprint: Option<String>,
    compiled: Vec<(String, Regex)>,
}

impl KeywordClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify free text against the map's categories in order; the first
    /// category whose matcher fires wins. Blank and sentinel inputs map to
    /// `Not Specified`; unmatched text comes back whitespace-normalized.
    pub fn infer_final_category(&mut self, text: &str, map: &CategoryKeywordMap) -> String {
        let txt = normalize_text(text);
        if txt.is_empty() || SENTINEL_VALUES.contains(&txt.to_lowercase().as_str()) {
            return NOT_SPECIFIED.to_string();
        }

        for (label, matcher) in self.compiled_for(map) {
            if matcher.is_match(&txt) {
                return label.clone();
            }
        }

        txt
    }

    /// Fill the "Final Category" column for every row that does not already
    /// carry a non-blank value, inferring from `category_column`. Returns a
    /// new table; input rows are never mutated.
    pub fn ensure_final_category_column(
        &mut self,
        table: &[Row],
        category_column: &str,
        map: &CategoryKeywordMap,
    ) -> Vec<Row> {
        table
            .iter()
            .map(|row| {
                if !row.is_blank(FINAL_CATEGORY_COLUMN) {
                    return row.clone();
                }
                let category = self.infer_final_category(&row.text(category_column), map);
                let mut updated = row.clone();
                updated.set(FINAL_CATEGORY_COLUMN, category);
                updated
            })
            .collect()
    }

    /// Compiled matchers for the map, rebuilt only when its content changes
    fn compiled_for(&mut self, map: &CategoryKeywordMap) -> &[(String, Regex)] {
        let fingerprint = map.fingerprint();
        if self.cached_fingerprint.as_deref() != Some(fingerprint.as_str()) {
            self.compiled = compile_keyword_map(map);
            self.cached_fingerprint = Some(fingerprint);
        }
        &self.compiled
    }
}

/// Compile one case-insensitive alternation per category, preserving the
/// map's category order. A category whose pattern fails to compile is
/// logged and skipped; compilation is never fatal.
fn compile_keyword_map(map: &CategoryKeywordMap) -> Vec<(String, Regex)> {
    let mut compiled = Vec::new();

    for entry in map.entries() {
        let parts: Vec<String> = entry
            .keywords
            .iter()
            .map(|keyword| {
                if keyword.chars().any(|c| REGEX_METACHARS.contains(c)) {
                    keyword.clone()
                } else {
                    format!(r"\b{}\b", regex::escape(keyword))
                }
            })
            .collect();

        let combined = format!("(?:{})", parts.join("|"));
        match RegexBuilder::new(&combined).case_insensitive(true).build() {
            Ok(matcher) => compiled.push((entry.label.clone(), matcher)),
            Err(err) => {
                warn!(category = %entry.label, error = %err, "Skipping uncompilable keyword pattern");
            }
        }
    }

    compiled
}
