use async_trait::async_trait;
use contact_verifier::error::{SearchError, SearchResult};
use contact_verifier::models::SearchCandidate;
use contact_verifier::search::{SearchBackend, SearchQuery};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Scripted search backend.
///
/// Returns canned candidates per person name, or fails every attempt when
/// configured to. Records the query strings it receives.
#[derive(Clone)]
pub struct MockSearchBackend {
    name: String,
    results: Arc<Mutex<HashMap<String, Vec<SearchCandidate>>>>,
    failing: bool,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockSearchBackend {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            results: Arc::new(Mutex::new(HashMap::new())),
            failing: false,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A backend whose every attempt errors.
    pub fn failing(name: &str) -> Self {
        Self {
            failing: true,
            ..Self::new(name)
        }
    }

    pub fn with_results(self, person: &str, candidates: Vec<SearchCandidate>) -> Self {
        self.results
            .lock()
            .unwrap()
            .insert(person.to_string(), candidates);
        self
    }

    pub fn attempts(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for MockSearchBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn attempt(&self, query: &SearchQuery) -> SearchResult<Vec<SearchCandidate>> {
        self.queries.lock().unwrap().push(query.to_query_string());
        if self.failing {
            return Err(SearchError::Timeout {
                engine: self.name.clone(),
                seconds: 15,
            });
        }
        let results = self.results.lock().unwrap();
        Ok(results.get(query.name()).cloned().unwrap_or_default())
    }
}
