// ============================================================
// BRAND METRICS AGGREGATOR
// ============================================================
// Per-brand engagement summary over the unified row set

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::application::use_cases::normalizer::normalize_text;
use crate::domain::metrics::{BrandMetricsRow, PlatformMetrics};
use crate::domain::table::Row;

/// Post formats treated as video-like for view and rate calculations
const VIDEO_FORMATS: &[&str] = &["video", "shorts"];

/// Post formats treated as image-like, rated against followers instead
const IMAGE_FORMATS: &[&str] = &["image", "sidecar"];

/// Build one summary row per brand that has at least one matching row;
/// brands with zero matches are omitted by design. Brand matching is
/// case-insensitive with whitespace collapsed.
pub fn create_data_points_summary(table: &[Row], brands: &[String]) -> Vec<BrandMetricsRow> {
    let mut results = Vec::new();

    for brand in brands {
        let wanted = normalize_text(brand).to_lowercase();
        let brand_rows: Vec<&Row> = table
            .iter()
            .filter(|row| normalize_text(&row.text("Brand Name")).to_lowercase() == wanted)
            .collect();
        if brand_rows.is_empty() {
            debug!(brand = %brand, "No rows for brand, omitting from summary");
            continue;
        }

        let total_posts = brand_rows.len();
        let avg_posts_per_month = average_posts_per_month(&brand_rows);

        let total_likes: f64 = brand_rows.iter().map(|r| r.number("likesCount")).sum();
        let total_comments: f64 = brand_rows.iter().map(|r| r.number("commentsCount")).sum();
        let total_engagement: f64 = brand_rows.iter().map(|r| r.number("Engagement")).sum();
        let total_views: f64 = brand_rows
            .iter()
            .filter(|r| is_video_like(r))
            .map(|r| r.number("videoPlayCount"))
            .sum();
        let overall_avg_er = avg_er_for_videos_shorts(&brand_rows);

        let tiktok = platform_metrics(&brand_rows, "TikTok");
        let instagram = platform_metrics(&brand_rows, "Instagram");
        let youtube = platform_metrics(&brand_rows, "YouTube");
        let facebook = platform_metrics(&brand_rows, "Facebook");

        let instagram_rows: Vec<&Row> = brand_rows
            .iter()
            .copied()
            .filter(|r| r.text("Source") == "Instagram")
            .collect();
        let ig_branded: Vec<&Row> = instagram_rows
            .iter()
            .copied()
            .filter(|r| r.text("Type of Post") == "Branded" && is_video_like(r))
            .collect();
        let ig_tagged: Vec<&Row> = instagram_rows
            .iter()
            .copied()
            .filter(|r| r.text("Type of Post") == "Tagged" && is_video_like(r))
            .collect();

        let yt_videos: Vec<&Row> = brand_rows
            .iter()
            .copied()
            .filter(|r| r.text("Source") == "YouTube" && format_of(r) == "video")
            .collect();
        let yt_shorts: Vec<&Row> = brand_rows
            .iter()
            .copied()
            .filter(|r| r.text("Source") == "YouTube" && format_of(r) == "shorts")
            .collect();

        let ig_images: Vec<&Row> = instagram_rows
            .iter()
            .copied()
            .filter(|r| format_of(r) == "image")
            .collect();
        let ig_sidecars: Vec<&Row> = instagram_rows
            .iter()
            .copied()
            .filter(|r| format_of(r) == "sidecar")
            .collect();

        let facebook_rows: Vec<&Row> = brand_rows
            .iter()
            .copied()
            .filter(|r| r.text("Source") == "Facebook")
            .collect();
        let fb_images: Vec<&Row> = facebook_rows
            .iter()
            .copied()
            .filter(|r| format_of(r) == "image")
            .collect();
        let fb_videos: Vec<&Row> = facebook_rows
            .iter()
            .copied()
            .filter(|r| format_of(r) == "video")
            .collect();

        results.push(BrandMetricsRow {
            brand: brand.clone(),
            total_posts,
            avg_posts_per_month,
            total_likes,
            total_comments,
            total_engagement,
            total_views,
            overall_avg_er,
            tiktok_total_posts: tiktok.posts,
            tiktok_followers: tiktok.followers,
            tiktok_avg_er: tiktok.avg_er,
            instagram_total_posts: instagram.posts,
            instagram_followers: instagram.followers,
            instagram_avg_er: instagram.avg_er,
            instagram_branded_posts: ig_branded.len(),
            instagram_branded_er: avg_er_for_videos_shorts(&ig_branded),
            instagram_tagged_posts: ig_tagged.len(),
            instagram_tagged_er: avg_er_for_videos_shorts(&ig_tagged),
            youtube_total_posts: youtube.posts,
            youtube_followers: youtube.followers,
            youtube_avg_er: youtube.avg_er,
            youtube_video_posts: yt_videos.len(),
            youtube_video_er: avg_er_for_videos_shorts(&yt_videos),
            youtube_shorts_posts: yt_shorts.len(),
            youtube_shorts_er: avg_er_for_videos_shorts(&yt_shorts),
            instagram_image_posts: ig_images.len(),
            instagram_image_er: avg_er_for_images_sidecars(&ig_images),
            instagram_sidecar_posts: ig_sidecars.len(),
            instagram_sidecar_er: avg_er_for_images_sidecars(&ig_sidecars),
            facebook_total_posts: facebook.posts,
            facebook_followers: facebook.followers,
            facebook_avg_er: facebook.avg_er,
            facebook_image_posts: fb_images.len(),
            facebook_image_er: avg_er_for_images_sidecars(&fb_images),
            facebook_video_posts: fb_videos.len(),
            facebook_video_er: avg_er_for_videos_shorts(&fb_videos),
        });
    }

    results
}

fn format_of(row: &Row) -> String {
    row.text("Post Format").to_lowercase()
}

fn is_video_like(row: &Row) -> bool {
    VIDEO_FORMATS.contains(&format_of(row).as_str())
}

fn is_image_like(row: &Row) -> bool {
    IMAGE_FORMATS.contains(&format_of(row).as_str())
}

/// Engagement rate over video-like rows: `(Σengagement / Σplays) * 100`.
/// None when there are no video-like rows or zero total plays.
fn avg_er_for_videos_shorts(rows: &[&Row]) -> Option<f64> {
    let video_rows: Vec<&&Row> = rows.iter().filter(|r| is_video_like(r)).collect();
    if video_rows.is_empty() {
        return None;
    }

    let total_engagement: f64 = video_rows.iter().map(|r| r.number("Engagement")).sum();
    let total_plays: f64 = video_rows.iter().map(|r| r.number("videoPlayCount")).sum();

    if total_plays > 0.0 {
        Some(round2(total_engagement / total_plays * 100.0))
    } else {
        None
    }
}

/// Engagement rate over image-like rows, against followers:
/// `(Σengagement / (followers₀ × row count)) * 100` with the first row's
/// follower count as a constant multiplier. None when there are no
/// image-like rows or zero total followers.
fn avg_er_for_images_sidecars(rows: &[&Row]) -> Option<f64> {
    let image_rows: Vec<&&Row> = rows.iter().filter(|r| is_image_like(r)).collect();
    if image_rows.is_empty() {
        return None;
    }

    let total_engagement: f64 = image_rows.iter().map(|r| r.number("Engagement")).sum();
    let followers = image_rows[0].number("Followers");
    let total_followers = followers * image_rows.len() as f64;

    if total_followers > 0.0 {
        Some(round2(total_engagement / total_followers * 100.0))
    } else {
        None
    }
}

fn platform_metrics(brand_rows: &[&Row], source: &str) -> PlatformMetrics {
    let platform_rows: Vec<&Row> = brand_rows
        .iter()
        .copied()
        .filter(|r| r.text("Source") == source)
        .collect();

    let followers = platform_rows
        .first()
        .filter(|r| !r.is_blank("Followers"))
        .map(|r| r.number("Followers"));

    PlatformMetrics {
        posts: platform_rows.iter().filter(|r| is_video_like(r)).count(),
        followers,
        avg_er: avg_er_for_videos_shorts(&platform_rows),
    }
}

/// Posts per month over the span between the earliest and latest valid
/// timestamp, in 30-day months floored at one month. None when no row
/// carries a parseable timestamp.
fn average_posts_per_month(brand_rows: &[&Row]) -> Option<f64> {
    let timestamps: Vec<i64> = brand_rows
        .iter()
        .filter_map(|row| {
            let raw = match row.is_blank("timestamp") {
                false => row.text("timestamp"),
                true => row.text("Timestamp"),
            };
            parse_timestamp(&raw)
        })
        .collect();

    let min = *timestamps.iter().min()?;
    let max = *timestamps.iter().max()?;

    let months = ((max - min) as f64 / (30.0 * 86_400.0)).max(1.0);
    Some(brand_rows.len() as f64 / months)
}

fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.timestamp());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed.and_utc().timestamp());
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(parsed.and_hms_opt(0, 0, 0)?.and_utc().timestamp());
    }
    None
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
