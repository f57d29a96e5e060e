// ============================================================
// BRAND METRICS TYPES
// ============================================================
// Per-brand engagement summary rows and influencer tiering

use serde::{Deserialize, Serialize};

/// Follower thresholds for influencer tier labels
pub const TIER_MEGA: f64 = 500_000.0;
pub const TIER_MACRO: f64 = 100_000.0;
pub const TIER_MICRO: f64 = 10_000.0;
pub const TIER_NANO: f64 = 1_000.0;

/// Tier label for a follower count
pub fn determine_influencer_tier(followers: f64) -> &'static str {
    if followers >= TIER_MEGA {
        "Mega"
    } else if followers >= TIER_MACRO {
        "Macro"
    } else if followers >= TIER_MICRO {
        "Micro"
    } else if followers > TIER_NANO {
        "Nano"
    } else {
        "Pico"
    }
}

/// Engagement metrics for one platform within a brand
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformMetrics {
    /// Post count restricted to video-like formats
    pub posts: usize,
    /// Follower count from the first matching row, assumed constant
    pub followers: Option<f64>,
    /// Average engagement rate over video-like rows, percent
    pub avg_er: Option<f64>,
}

/// One output row of the brand metrics summary.
///
/// Field names serialize to the exact column labels the download
/// sheet uses, so the UI can render the table verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandMetricsRow {
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Total Posts")]
    pub total_posts: usize,
    #[serde(rename = "Avg Posts Per Month")]
    pub avg_posts_per_month: Option<f64>,
    #[serde(rename = "Total Likes")]
    pub total_likes: f64,
    #[serde(rename = "Total Comments")]
    pub total_comments: f64,
    #[serde(rename = "Total Engagement")]
    pub total_engagement: f64,
    #[serde(rename = "Total Views")]
    pub total_views: f64,
    #[serde(rename = "Overall Avg ER")]
    pub overall_avg_er: Option<f64>,
    #[serde(rename = "TikTok Total Posts")]
    pub tiktok_total_posts: usize,
    #[serde(rename = "TikTok Followers")]
    pub tiktok_followers: Option<f64>,
    #[serde(rename = "TikTok Avg ER")]
    pub tiktok_avg_er: Option<f64>,
    #[serde(rename = "Instagram Total Posts")]
    pub instagram_total_posts: usize,
    #[serde(rename = "Instagram Followers")]
    pub instagram_followers: Option<f64>,
    #[serde(rename = "Instagram Avg ER")]
    pub instagram_avg_er: Option<f64>,
    #[serde(rename = "Instagram Branded Posts")]
    pub instagram_branded_posts: usize,
    #[serde(rename = "Instagram Branded ER")]
    pub instagram_branded_er: Option<f64>,
    #[serde(rename = "Instagram Tagged Posts")]
    pub instagram_tagged_posts: usize,
    #[serde(rename = "Instagram Tagged ER")]
    pub instagram_tagged_er: Option<f64>,
    #[serde(rename = "YouTube Total Posts")]
    pub youtube_total_posts: usize,
    #[serde(rename = "YouTube Followers")]
    pub youtube_followers: Option<f64>,
    #[serde(rename = "YouTube Avg ER")]
    pub youtube_avg_er: Option<f64>,
    #[serde(rename = "YouTube Video Posts")]
    pub youtube_video_posts: usize,
    #[serde(rename = "YouTube Video ER")]
    pub youtube_video_er: Option<f64>,
    #[serde(rename = "YouTube Shorts Posts")]
    pub youtube_shorts_posts: usize,
    #[serde(rename = "YouTube Shorts ER")]
    pub youtube_shorts_er: Option<f64>,
    #[serde(rename = "Instagram Image Posts")]
    pub instagram_image_posts: usize,
    #[serde(rename = "Instagram Image ER")]
    pub instagram_image_er: Option<f64>,
    #[serde(rename = "Instagram Sidecar Posts")]
    pub instagram_sidecar_posts: usize,
    #[serde(rename = "Instagram Sidecar ER")]
    pub instagram_sidecar_er: Option<f64>,
    #[serde(rename = "Facebook Total Posts")]
    pub facebook_total_posts: usize,
    #[serde(rename = "Facebook Followers")]
    pub facebook_followers: Option<f64>,
    #[serde(rename = "Facebook Avg ER")]
    pub facebook_avg_er: Option<f64>,
    #[serde(rename = "Facebook Image Posts")]
    pub facebook_image_posts: usize,
    #[serde(rename = "Facebook Image ER")]
    pub facebook_image_er: Option<f64>,
    #[serde(rename = "Facebook Video Posts")]
    pub facebook_video_posts: usize,
    #[serde(rename = "Facebook Video ER")]
    pub facebook_video_er: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(determine_influencer_tier(500_000.0), "Mega");
        assert_eq!(determine_influencer_tier(499_999.0), "Macro");
        assert_eq!(determine_influencer_tier(100_000.0), "Macro");
        assert_eq!(determine_influencer_tier(10_000.0), "Micro");
        assert_eq!(determine_influencer_tier(1_001.0), "Nano");
        assert_eq!(determine_influencer_tier(1_000.0), "Pico");
        assert_eq!(determine_influencer_tier(0.0), "Pico");
    }
}
