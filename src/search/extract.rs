//! Pure helpers for turning raw result-page links and text into candidates.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Host and path of a professional-network profile, capturing the slug.
static PROFILE_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://(?:[a-z0-9-]+\.)?linkedin\.com/in/([^/?#\s]+)")
        .expect("Failed to compile profile URL regex")
});

/// Base for resolving relative result links such as `/url?q=...`.
static RELATIVE_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("https://search.invalid/").expect("Failed to parse base URL"));

/// Query parameters search engines use to wrap the real target of a result link.
const REDIRECT_PARAMS: [&str; 3] = ["q", "url", "uddg"];

/// Return the real target of a result link, unwrapping engine redirects.
///
/// Links that are not redirects are returned unchanged.
pub fn unwrap_redirect(href: &str) -> String {
    let href = href.trim();
    if PROFILE_URL_REGEX.is_match(href) {
        return href.to_string();
    }

    let parsed = match Url::options().base_url(Some(&*RELATIVE_BASE)).parse(href) {
        Ok(url) => url,
        Err(_) => return href.to_string(),
    };

    for param in REDIRECT_PARAMS {
        if let Some((_, target)) = parsed.query_pairs().find(|(key, _)| key == param) {
            if target.starts_with("http") {
                return target.into_owned();
            }
        }
    }

    href.to_string()
}

/// Canonical `https://www.linkedin.com/in/<slug>` form of a profile link, or
/// `None` when the (unwrapped) link is not a profile.
pub fn canonical_profile_url(href: &str) -> Option<String> {
    let target = unwrap_redirect(href);
    let captures = PROFILE_URL_REGEX.captures(&target)?;
    let slug = captures.get(1)?.as_str().trim_end_matches('/').to_lowercase();
    if slug.is_empty() {
        return None;
    }
    Some(format!("https://www.linkedin.com/in/{}", slug))
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercased, whitespace-normalized text used for matching.
pub fn normalize_text(text: &str) -> String {
    clean_text(text).to_lowercase()
}
