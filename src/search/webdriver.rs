//! Headless-browser search backend over an external WebDriver server.

use crate::error::{SearchError, SearchResult};
use crate::models::SearchCandidate;
use crate::search::engine::{SearchBackend, SearchQuery};
use crate::search::extract::{canonical_profile_url, clean_text};
use crate::search::profiles::EngineProfile;
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::map::Map as JsonMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};

const SETTLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A browser session created on first use and shared by every engine.
pub struct BrowserSession {
    webdriver_url: String,
    client: OnceCell<Client>,
    page: Mutex<()>,
}

impl BrowserSession {
    pub fn new(webdriver_url: impl Into<String>) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            client: OnceCell::new(),
            page: Mutex::new(()),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.client.initialized()
    }

    /// Connected client, creating the session on first call.
    pub async fn client(&self) -> SearchResult<&Client> {
        self.client.get_or_try_init(|| self.connect()).await
    }

    async fn connect(&self) -> SearchResult<Client> {
        tracing::debug!(target: "search_webdriver", "Connecting to WebDriver at {}...", self.webdriver_url);

        let mut caps = JsonMap::new();
        let mut chrome_opts = JsonMap::new();

        let args = vec![
            "--headless=new",
            "--no-sandbox",
            "--disable-gpu",
            "--disable-dev-shm-usage",
            "--window-size=1280,900",
            "--disable-extensions",
            "--disable-background-networking",
            "--disable-sync",
            "--mute-audio",
            "--lang=en-US",
            "--log-level=1",
        ];
        chrome_opts.insert("args".to_string(), serde_json::json!(args));

        caps.insert("browserName".to_string(), serde_json::json!("chrome"));
        caps.insert(
            "goog:chromeOptions".to_string(),
            serde_json::json!(chrome_opts),
        );

        let mut builder = ClientBuilder::native();
        builder.capabilities(caps);

        match builder.connect(&self.webdriver_url).await {
            Ok(client) => {
                tracing::info!(target: "search_webdriver", "WebDriver session started");
                Ok(client)
            }
            Err(e) => {
                tracing::error!(target: "search_webdriver", "Failed to connect to WebDriver at {}: {}", self.webdriver_url, e);
                Err(SearchError::Browser(e.to_string()))
            }
        }
    }

    /// Close the session if one was started, logging any error.
    pub async fn close(&self) {
        if let Some(client) = self.client.get() {
            tracing::debug!(target: "search_webdriver", "Closing WebDriver session...");
            if let Err(e) = client.clone().close().await {
                tracing::warn!(target: "search_webdriver", "Failed to close WebDriver session cleanly: {}", e);
            }
        }
    }
}

/// Searches one engine through the shared browser session.
pub struct WebDriverBackend {
    profile: EngineProfile,
    session: Arc<BrowserSession>,
    navigation_timeout: Duration,
}

impl WebDriverBackend {
    pub fn new(
        profile: EngineProfile,
        session: Arc<BrowserSession>,
        navigation_timeout: Duration,
    ) -> Self {
        Self {
            profile,
            session,
            navigation_timeout,
        }
    }

    /// One backend per default engine profile, in priority order.
    pub fn for_all_engines(
        session: Arc<BrowserSession>,
        navigation_timeout: Duration,
    ) -> Vec<Arc<dyn SearchBackend>> {
        EngineProfile::defaults()
            .into_iter()
            .map(|profile| {
                Arc::new(Self::new(profile, session.clone(), navigation_timeout))
                    as Arc<dyn SearchBackend>
            })
            .collect()
    }

    fn navigation_error(&self, message: impl ToString) -> SearchError {
        SearchError::Navigation {
            engine: self.profile.name.to_string(),
            message: message.to_string(),
        }
    }

    fn extraction_error(&self, message: impl ToString) -> SearchError {
        SearchError::Extraction {
            engine: self.profile.name.to_string(),
            message: message.to_string(),
        }
    }

    async fn navigate(&self, client: &Client, url: &str) -> SearchResult<()> {
        match tokio::time::timeout(self.navigation_timeout, client.goto(url)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(self.navigation_error(e)),
            Err(_) => Err(SearchError::Timeout {
                engine: self.profile.name.to_string(),
                seconds: self.navigation_timeout.as_secs(),
            }),
        }
    }

    /// Wait until the document reports complete, within the navigation bound.
    async fn wait_for_settle(&self, client: &Client) {
        let poll = async {
            loop {
                match client
                    .execute("return document.readyState", Vec::new())
                    .await
                {
                    Ok(state) if state.as_str() == Some("complete") => break,
                    Ok(_) => tokio::time::sleep(SETTLE_POLL_INTERVAL).await,
                    Err(e) => {
                        tracing::debug!(engine = self.profile.name, "readyState check failed: {}", e);
                        break;
                    }
                }
            }
        };

        if tokio::time::timeout(self.navigation_timeout, poll).await.is_err() {
            tracing::debug!(engine = self.profile.name, "Page did not settle, extracting anyway");
        }
    }

    /// Nearest result container for a link, trying each container rule in order.
    async fn resolve_container(&self, link: &Element) -> Option<Element> {
        for rule in self.profile.container_rules {
            if let Ok(container) = link.find(Locator::XPath(*rule)).await {
                return Some(container);
            }
        }
        None
    }

    /// Text of the first rule that matches a non-empty element.
    async fn first_text(container: &Element, rules: &[&str]) -> Option<String> {
        for rule in rules {
            if let Ok(element) = container.find(Locator::Css(*rule)).await {
                if let Ok(text) = element.text().await {
                    let text = clean_text(&text);
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
            }
        }
        None
    }

    async fn candidate_from_link(&self, link: &Element, url: String) -> SearchCandidate {
        let link_text = link
            .text()
            .await
            .map(|t| clean_text(&t))
            .unwrap_or_default();

        let Some(container) = self.resolve_container(link).await else {
            return SearchCandidate::new(link_text, url, String::new());
        };

        let title = Self::first_text(&container, self.profile.title_rules)
            .await
            .unwrap_or(link_text);
        let snippet = match Self::first_text(&container, self.profile.snippet_rules).await {
            Some(snippet) => snippet,
            None => container
                .text()
                .await
                .map(|t| clean_text(&t))
                .unwrap_or_default(),
        };

        SearchCandidate::new(title, url, snippet)
    }
}

#[async_trait]
impl SearchBackend for WebDriverBackend {
    fn name(&self) -> &str {
        self.profile.name
    }

    async fn attempt(&self, query: &SearchQuery) -> SearchResult<Vec<SearchCandidate>> {
        let client = self.session.client().await?;
        let _page = self.session.page.lock().await;

        let url = self.profile.url_for(&query.to_query_string());
        tracing::debug!(engine = self.profile.name, "GET {}", url);
        self.navigate(client, &url).await?;
        self.wait_for_settle(client).await;

        let links = client
            .find_all(Locator::Css(self.profile.link_selector))
            .await
            .map_err(|e| self.extraction_error(e))?;

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for link in links {
            let href = match link.attr("href").await {
                Ok(Some(href)) => href,
                Ok(None) => continue,
                Err(e) => {
                    tracing::debug!(engine = self.profile.name, "Unreadable link: {}", e);
                    continue;
                }
            };
            let Some(profile_url) = canonical_profile_url(&href) else {
                continue;
            };
            if !seen.insert(profile_url.clone()) {
                continue;
            }

            candidates.push(self.candidate_from_link(&link, profile_url).await);
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_is_lazy() {
        let session = BrowserSession::new("http://localhost:9515");
        assert!(!session.is_connected());
    }

    #[test]
    fn test_one_backend_per_engine() {
        let session = Arc::new(BrowserSession::new("http://localhost:9515"));
        let backends = WebDriverBackend::for_all_engines(session, Duration::from_secs(15));
        let names: Vec<&str> = backends.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["google", "bing", "duckduckgo"]);
    }

    #[tokio::test]
    async fn test_close_without_session_is_noop() {
        let session = BrowserSession::new("http://localhost:9515");
        session.close().await;
        assert!(!session.is_connected());
    }
}
