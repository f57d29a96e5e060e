// ============================================================
// UNIFIED TABLE BUILDER
// ============================================================
// Normalize raw platform JSON exports into the common row schema

use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::domain::metrics::determine_influencer_tier;
use crate::domain::table::{CellValue, Row, Table};

/// Combine Instagram, YouTube, and TikTok exports into one table with the
/// shared column layout. Instagram rows need the followers export for the
/// username/userId lookup. Serial numbers are assigned once at the end,
/// across all platforms.
pub fn create_table_from_jsons(
    instagram_posts: &[Value],
    followers_data: &[Value],
    youtube_posts: &[Value],
    tiktok_posts: &[Value],
) -> Table {
    let mut rows = Vec::new();

    if !instagram_posts.is_empty() {
        rows.extend(parse_instagram_data(instagram_posts, followers_data));
    }
    rows.extend(parse_youtube_data(youtube_posts));
    rows.extend(parse_tiktok_data(tiktok_posts));

    for (index, row) in rows.iter_mut().enumerate() {
        row.set("SNo", CellValue::from(index as i64 + 1));
    }

    debug!(rows = rows.len(), "Built unified table from platform exports");
    rows
}

pub fn parse_instagram_data(instagram_posts: &[Value], followers_data: &[Value]) -> Table {
    // Followers are looked up by username first, then by user id
    let mut followers_by_key: HashMap<String, f64> = HashMap::new();
    for profile in followers_data {
        let count = num(profile, "followersCount");
        let username = text(profile, "userName");
        let user_id = text(profile, "userId");
        if !username.is_empty() {
            followers_by_key.insert(username, count);
        }
        if !user_id.is_empty() {
            followers_by_key.insert(user_id, count);
        }
    }

    instagram_posts
        .iter()
        .map(|post| {
            let username = text(post, "ownerUsername");
            let user_id = text(post, "ownerId");
            let followers = followers_by_key
                .get(&username)
                .or_else(|| followers_by_key.get(&user_id))
                .copied()
                .unwrap_or(0.0);

            let likes = num(post, "likesCount");
            let comments = num(post, "commentsCount");
            let engagement = likes + comments;
            let format = text(post, "type");
            let views = match format.as_str() {
                "Video" | "Reel" => num(post, "videoPlayCount"),
                _ => 0.0,
            };

            let paid_partnership = match truthy(post, "isSponsored") {
                true => "Yes",
                false => "No",
            };

            unified_row(UnifiedPost {
                url: text(post, "inputUrl"),
                source: "Instagram",
                caption_title: text(post, "caption"),
                caption_text: String::new(),
                likes,
                comments,
                views,
                owner_username: username.clone(),
                influencer_id: format!("https://www.instagram.com/{username}"),
                followers,
                timestamp: text(post, "timestamp"),
                format,
                paid_partnership: paid_partnership.to_string(),
            })
        })
        .collect()
}

pub fn parse_youtube_data(youtube_posts: &[Value]) -> Table {
    youtube_posts
        .iter()
        .map(|post| {
            let format = text(post, "type");
            let mut chars = format.chars();
            let format = match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            };

            unified_row(UnifiedPost {
                url: text(post, "url"),
                source: "YouTube",
                caption_title: text(post, "title"),
                caption_text: text(post, "text"),
                likes: num(post, "likes"),
                comments: num(post, "commentsCount"),
                views: num(post, "viewCount"),
                owner_username: text(post, "channelUsername"),
                influencer_id: text(post, "channelUrl"),
                followers: num(post, "numberOfSubscribers"),
                timestamp: text(post, "date"),
                format,
                paid_partnership: String::new(),
            })
        })
        .collect()
}

pub fn parse_tiktok_data(tiktok_posts: &[Value]) -> Table {
    tiktok_posts
        .iter()
        .map(|post| {
            let author = post.get("authorMeta").cloned().unwrap_or(Value::Null);

            unified_row(UnifiedPost {
                url: text(post, "webVideoUrl"),
                source: "TikTok",
                caption_title: text(post, "text"),
                caption_text: String::new(),
                likes: num(post, "diggCount"),
                comments: num(post, "commentCount"),
                views: num(post, "playCount"),
                owner_username: text(&author, "name"),
                influencer_id: text(&author, "profileUrl"),
                followers: num(&author, "fans"),
                timestamp: text(post, "createTimeISO"),
                format: "Video".to_string(),
                paid_partnership: String::new(),
            })
        })
        .collect()
}

struct UnifiedPost {
    url: String,
    source: &'static str,
    caption_title: String,
    caption_text: String,
    likes: f64,
    comments: f64,
    views: f64,
    owner_username: String,
    influencer_id: String,
    followers: f64,
    timestamp: String,
    format: String,
    paid_partnership: String,
}

fn unified_row(post: UnifiedPost) -> Row {
    let engagement = post.likes + post.comments;
    let er_on_views = match post.views > 0.0 {
        true => round2(engagement / post.views * 100.0),
        false => 0.0,
    };
    let er_on_followers = match post.followers > 0.0 {
        true => round2(engagement / post.followers * 100.0),
        false => 0.0,
    };

    Row::from_pairs(vec![
        ("SNo".to_string(), CellValue::Empty),
        ("URL".to_string(), post.url.into()),
        ("Source".to_string(), post.source.into()),
        ("Final Category".to_string(), CellValue::Empty),
        ("Category".to_string(), CellValue::Empty),
        ("Brand".to_string(), CellValue::Empty),
        ("Content Type".to_string(), CellValue::Empty),
        ("Caption (Title)".to_string(), post.caption_title.into()),
        ("Caption (Text)".to_string(), post.caption_text.into()),
        ("Likes".to_string(), post.likes.into()),
        ("Comments".to_string(), post.comments.into()),
        ("Engagement".to_string(), engagement.into()),
        ("Views".to_string(), post.views.into()),
        ("ER% on Views".to_string(), er_on_views.into()),
        ("% ER Based on Followers".to_string(), er_on_followers.into()),
        ("Owner Username".to_string(), post.owner_username.into()),
        ("Influencer ID".to_string(), post.influencer_id.into()),
        ("Followers".to_string(), post.followers.into()),
        (
            "Influencer Tier (Mega, Macro...)".to_string(),
            determine_influencer_tier(post.followers).into(),
        ),
        ("Timestamp".to_string(), post.timestamp.into()),
        ("Format".to_string(), post.format.into()),
        ("Paid Partnership".to_string(), post.paid_partnership.into()),
    ])
}

fn text(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn num(value: &Value, key: &str) -> f64 {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn truthy(value: &Value, key: &str) -> bool {
    matches!(value.get(key), Some(Value::Bool(true)))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
