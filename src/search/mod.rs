//! Multi-engine profile search.
//!
//! The [`SearchEngine`] walks an ordered list of [`SearchBackend`]s, sharing
//! one rate limiter, until a backend yields profile candidates. The production
//! backend drives a headless browser per [`EngineProfile`].

pub mod engine;
pub mod extract;
pub mod profiles;
pub mod webdriver;

pub use engine::{SearchBackend, SearchDelay, SearchEngine, SearchQuery, MAX_CANDIDATES};
pub use extract::{canonical_profile_url, normalize_text};
pub use profiles::EngineProfile;
pub use webdriver::{BrowserSession, WebDriverBackend};
