// ============================================================
// USERNAME EXTRACTOR
// ============================================================
// Pull unique owner usernames from an Instagram post export

use serde_json::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Extraction result: totals plus the unique username list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameExtraction {
    pub total_posts: usize,
    pub total_usernames: usize,
    pub unique_usernames: usize,
    pub usernames: Vec<String>,
}

/// Extract `ownerUsername` values from Instagram posts, trimmed and
/// deduplicated first-seen-wins. Deduplication is case-sensitive since
/// Instagram handles are; order follows the export.
pub fn extract_instagram_usernames(posts: &[Value]) -> UsernameExtraction {
    let mut usernames = Vec::new();
    for post in posts {
        if let Some(Value::String(username)) = post.get("ownerUsername") {
            let trimmed = username.trim();
            if !trimmed.is_empty() {
                usernames.push(trimmed.to_string());
            }
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique = Vec::new();
    for username in &usernames {
        if seen.insert(username.as_str()) {
            unique.push(username.clone());
        }
    }

    UsernameExtraction {
        total_posts: posts.len(),
        total_usernames: usernames.len(),
        unique_usernames: unique.len(),
        usernames: unique,
    }
}
