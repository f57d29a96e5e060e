// ============================================================
// TEXT AND URL NORMALIZER
// ============================================================
// Canonicalize free text and URLs ahead of matching

use once_cell::sync::Lazy;
use std::collections::HashSet;
use url::form_urlencoded;
use url::Url;

use crate::application::use_cases::platform_id::extract_social_media_id;
use crate::domain::url::{NormalizedUrl, TRACKING_PARAMS};

static TRACKING_PARAM_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| TRACKING_PARAMS.iter().copied().collect());

/// Trim and collapse whitespace runs to a single space
pub fn normalize_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a URL into its canonical comparison form.
///
/// The platform ID is always extracted from the raw trimmed string, so an
/// unparseable URL still yields a usable (platform, id) pair; only the
/// string normalization falls back to the trimmed original.
///
/// Normalization is idempotent: feeding the `normalized` string back in
/// yields the same string.
pub fn normalize_url(url: &str) -> NormalizedUrl {
    let trimmed = url.trim();
    let id = extract_social_media_id(trimmed);

    let parsed = match Url::parse(trimmed) {
        Ok(parsed) => parsed,
        Err(_) => {
            return NormalizedUrl {
                normalized: trimmed.to_string(),
                id,
            }
        }
    };

    let Some(host) = parsed.host_str() else {
        // Scheme-only URIs (mailto: etc.) have no host to canonicalize
        return NormalizedUrl {
            normalized: trimmed.to_string(),
            id,
        };
    };

    let host = host.to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    let path = parsed.path().trim_end_matches('/');

    // Drop tracking parameters, then sort the survivors by key so that
    // parameter order never distinguishes two URLs
    let mut params: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !TRACKING_PARAM_SET.contains(key.to_lowercase().as_str()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    params.sort_by(|a, b| a.0.cmp(&b.0));

    let query: String = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();

    let normalized = if query.is_empty() {
        format!("https://{}{}", host, path)
    } else {
        format!("https://{}{}?{}", host, path, query)
    };

    NormalizedUrl { normalized, id }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::url::Platform;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  hello   world \n"), "hello world");
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn test_strips_tracking_params_and_www() {
        let result = normalize_url("https://www.Instagram.com/p/ABC/?utm_source=ig&igshid=xyz");
        assert_eq!(result.normalized, "https://instagram.com/p/ABC");
        assert_eq!(result.id.platform, Some(Platform::Instagram));
    }

    #[test]
    fn test_keeps_and_sorts_other_params() {
        let result = normalize_url("https://example.com/page?z=1&a=2&utm_medium=email");
        assert_eq!(result.normalized, "https://example.com/page?a=2&z=1");
    }

    #[test]
    fn test_unparseable_url_falls_back_to_trimmed() {
        let result = normalize_url("  instagram.com/p/XYZ123  ");
        assert_eq!(result.normalized, "instagram.com/p/XYZ123");
        // ID extraction still works on the raw string
        assert_eq!(result.id.platform, Some(Platform::Instagram));
        assert_eq!(result.id.unique_id.as_deref(), Some("xyz123"));
    }

    #[test]
    fn test_blank_input() {
        let result = normalize_url("   ");
        assert_eq!(result.normalized, "");
        assert_eq!(result.id.platform, None);
    }

    #[test]
    fn test_idempotence() {
        let inputs = [
            "https://www.youtube.com/watch?v=abc123&feature=share",
            "https://Example.com/A/B/?b=2&a=1",
            "https://vm.tiktok.com/ZMabc/?_r=1&_d=x",
            "not a url at all",
        ];
        for input in inputs {
            let once = normalize_url(input);
            let twice = normalize_url(&once.normalized);
            assert_eq!(once.normalized, twice.normalized, "input: {}", input);
        }
    }
}
