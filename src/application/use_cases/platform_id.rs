// ============================================================
// PLATFORM ID EXTRACTOR
// ============================================================
// Derive a (platform, post id) pair from a URL via ordered rules

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::url::{Platform, SocialMediaId};

/// Per-platform URL patterns, tried in order; the first match wins.
///
/// The ordering is load-bearing: some URLs could structurally match more
/// than one pattern, and rule position is the tie-break.
static PLATFORM_RULES: Lazy<Vec<(Platform, Regex)>> = Lazy::new(|| {
    vec![
        (
            Platform::Instagram,
            Regex::new(r"instagram\.com/(?:p|reel|tv)/([a-z0-9_-]+)").unwrap(),
        ),
        (
            Platform::Youtube,
            Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([a-z0-9_-]+)").unwrap(),
        ),
        (
            Platform::Tiktok,
            Regex::new(r"tiktok\.com/@[^/]+/video/(\d+)").unwrap(),
        ),
        (
            Platform::Tiktok,
            Regex::new(r"(?:vm\.tiktok\.com|vt\.tiktok\.com)/([a-z0-9]+)").unwrap(),
        ),
        (
            Platform::Facebook,
            Regex::new(r"facebook\.com/[^/]+/(?:posts|videos)/(\d+)").unwrap(),
        ),
        (
            Platform::Facebook,
            Regex::new(r"facebook\.com/photo\.php\?fbid=(\d+)").unwrap(),
        ),
        (
            Platform::Facebook,
            Regex::new(r"facebook\.com/watch/?\?v=(\d+)").unwrap(),
        ),
    ]
});

/// Extract the platform and post ID from a URL.
///
/// Matching runs against the lower-cased URL, so extracted IDs come back
/// lower-cased as well; comparisons elsewhere rely on that consistency.
pub fn extract_social_media_id(url: &str) -> SocialMediaId {
    let url_lower = url.to_lowercase();

    for (platform, rule) in PLATFORM_RULES.iter() {
        if let Some(captures) = rule.captures(&url_lower) {
            if let Some(id) = captures.get(1) {
                return SocialMediaId {
                    platform: Some(*platform),
                    unique_id: Some(id.as_str().to_string()),
                };
            }
        }
    }

    SocialMediaId::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(url: &str) -> (Option<Platform>, Option<String>) {
        let id = extract_social_media_id(url);
        (id.platform, id.unique_id)
    }

    #[test]
    fn test_instagram_variants() {
        for url in [
            "https://www.instagram.com/p/Cxy_12-ab/",
            "https://instagram.com/reel/Cxy_12-ab",
            "https://instagram.com/tv/Cxy_12-ab?igshid=x",
        ] {
            let (platform, id) = extract(url);
            assert_eq!(platform, Some(Platform::Instagram));
            assert_eq!(id.as_deref(), Some("cxy_12-ab"));
        }
    }

    #[test]
    fn test_youtube_watch_and_short_link() {
        assert_eq!(
            extract("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            (Some(Platform::Youtube), Some("dqw4w9wgxcq".to_string()))
        );
        assert_eq!(
            extract("https://youtu.be/dQw4w9WgXcQ"),
            (Some(Platform::Youtube), Some("dqw4w9wgxcq".to_string()))
        );
    }

    #[test]
    fn test_tiktok_video_and_short_link() {
        assert_eq!(
            extract("https://www.tiktok.com/@someuser/video/7234567890123456789"),
            (Some(Platform::Tiktok), Some("7234567890123456789".to_string()))
        );
        assert_eq!(
            extract("https://vm.tiktok.com/ZM8abc123/"),
            (Some(Platform::Tiktok), Some("zm8abc123".to_string()))
        );
    }

    #[test]
    fn test_facebook_variants() {
        assert_eq!(
            extract("https://www.facebook.com/somepage/posts/123456789"),
            (Some(Platform::Facebook), Some("123456789".to_string()))
        );
        assert_eq!(
            extract("https://facebook.com/photo.php?fbid=987654"),
            (Some(Platform::Facebook), Some("987654".to_string()))
        );
        assert_eq!(
            extract("https://www.facebook.com/watch?v=456123"),
            (Some(Platform::Facebook), Some("456123".to_string()))
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract("https://example.com/article/42"), (None, None));
        assert_eq!(extract(""), (None, None));
    }
}
