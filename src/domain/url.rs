// ============================================================
// URL DOMAIN TYPES
// ============================================================
// Value objects for URL normalization and deduplication

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::table::{Row, Table};

/// Social platforms recognized by the ID extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Youtube,
    Tiktok,
    Facebook,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
            Platform::Facebook => "facebook",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (platform, post id) pair extracted from a URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialMediaId {
    pub platform: Option<Platform>,
    pub unique_id: Option<String>,
}

impl SocialMediaId {
    /// Stable lookup key, present only when both halves are known
    pub fn key(&self) -> Option<String> {
        match (&self.platform, &self.unique_id) {
            (Some(platform), Some(id)) => Some(format!("{}:{}", platform, id)),
            _ => None,
        }
    }
}

/// A URL reduced to its canonical comparison form.
///
/// Two URLs naming the same logical resource either share `normalized`
/// or share a non-null (platform, unique id) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedUrl {
    pub normalized: String,
    #[serde(flatten)]
    pub id: SocialMediaId,
}

/// Why a row was removed by the deduplication engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicateReason {
    #[serde(rename = "exact")]
    Exact,
    #[serde(rename = "id-based")]
    IdBased,
    #[serde(rename = "similarity")]
    Similarity,
}

impl fmt::Display for DuplicateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateReason::Exact => f.write_str("exact"),
            DuplicateReason::IdBased => f.write_str("id-based"),
            DuplicateReason::Similarity => f.write_str("similarity"),
        }
    }
}

/// A removed row together with the reason it was removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateRecord {
    pub row: Row,
    pub reason: DuplicateReason,
}

/// Statistics for one deduplication run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupStats {
    pub total_urls: usize,
    pub exact_duplicates: usize,
    pub id_based_duplicates: usize,
    pub similarity_duplicates: usize,
    /// Occurrences per detected platform, counted over every input row
    pub platforms: BTreeMap<String, usize>,
    pub removed_total: usize,
    pub final_count: usize,
}

/// Full result of a deduplication run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupOutcome {
    pub cleaned_data: Table,
    pub duplicate_rows: Vec<DuplicateRecord>,
    pub stats: DedupStats,
}

/// Query parameters stripped during URL normalization (case-insensitive)
pub const TRACKING_PARAMS: &[&str] = &[
    // UTM parameters
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    // Facebook tracking
    "fbclid",
    "fb_action_ids",
    "fb_action_types",
    "fb_source",
    "fb_ref",
    // Instagram tracking
    "igshid",
    "igsh",
    "ig_rid",
    "ig_web_copy_link",
    // TikTok tracking
    "tt_from",
    "_r",
    "_d",
    "is_from_webapp",
    "is_copy_url",
    // YouTube tracking
    "feature",
    "gclid",
    "si",
    // General tracking
    "ref",
    "source",
    "campaign_id",
    "ad_id",
    "share_id",
    "sender_device",
    "timestamp",
    "_branch_match_id",
    "mibextid",
];
