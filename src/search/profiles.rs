//! Per-engine page structure.
//!
//! Result pages differ between engines and change over time, so each engine
//! is described as data: a search URL, a link selector, and ordered fallback
//! rules for the result container, title and snippet.

/// Selector for result links pointing at a profile, either directly or
/// percent-encoded inside a redirect.
const PROFILE_LINK_SELECTOR: &str = r#"a[href*="linkedin.com/in/"], a[href*="linkedin.com%2Fin%2F"]"#;

/// Page structure of one search engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineProfile {
    /// Short engine name used in logs and errors
    pub name: &'static str,

    /// Search URL prefix; the percent-encoded query is appended
    pub search_url: &'static str,

    /// CSS selector for candidate result links
    pub link_selector: &'static str,

    /// XPath rules, relative to a link, locating its result container
    pub container_rules: &'static [&'static str],

    /// CSS rules, relative to the container, locating the result title
    pub title_rules: &'static [&'static str],

    /// CSS rules, relative to the container, locating the result snippet
    pub snippet_rules: &'static [&'static str],
}

impl EngineProfile {
    pub fn google() -> Self {
        Self {
            name: "google",
            search_url: "https://www.google.com/search?hl=en&num=10&q=",
            link_selector: PROFILE_LINK_SELECTOR,
            container_rules: &[
                "./ancestor::div[contains(concat(' ', normalize-space(@class), ' '), ' g ')][1]",
                "./ancestor::div[contains(@class, 'MjjYud')][1]",
                "./ancestor::div[@data-hveid][1]",
                "./ancestor::div[2]",
            ],
            title_rules: &["h3", "a h3", "[role='heading']"],
            snippet_rules: &[
                "div.VwiC3b",
                "div[data-sncf]",
                "div[style*='-webkit-line-clamp']",
                "span.aCOpRe",
            ],
        }
    }

    pub fn bing() -> Self {
        Self {
            name: "bing",
            search_url: "https://www.bing.com/search?setlang=en&q=",
            link_selector: PROFILE_LINK_SELECTOR,
            container_rules: &[
                "./ancestor::li[contains(@class, 'b_algo')][1]",
                "./ancestor::li[1]",
                "./ancestor::div[2]",
            ],
            title_rules: &["h2", "h2 a", ".b_title"],
            snippet_rules: &["div.b_caption p", "p.b_lineclamp2", "p.b_algoSlug", "p"],
        }
    }

    pub fn duckduckgo() -> Self {
        Self {
            name: "duckduckgo",
            search_url: "https://html.duckduckgo.com/html/?q=",
            link_selector: PROFILE_LINK_SELECTOR,
            container_rules: &[
                "./ancestor::div[contains(@class, 'result__body')][1]",
                "./ancestor::div[contains(@class, 'result')][1]",
                "./ancestor::article[1]",
                "./ancestor::div[2]",
            ],
            title_rules: &["a.result__a", "h2", "[data-testid='result-title-a']"],
            snippet_rules: &[
                ".result__snippet",
                "[data-result='snippet']",
                "div[data-testid='result-snippet']",
            ],
        }
    }

    /// All supported engines in priority order.
    pub fn defaults() -> Vec<Self> {
        vec![Self::google(), Self::bing(), Self::duckduckgo()]
    }

    /// Full result-page URL for a query string.
    pub fn url_for(&self, query: &str) -> String {
        format!("{}{}", self.search_url, urlencoding::encode(query))
    }
}
