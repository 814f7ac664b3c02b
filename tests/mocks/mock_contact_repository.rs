use async_trait::async_trait;
use contact_verifier::client::StaleContactQuery;
use contact_verifier::error::{CrmApiError, CrmApiResult};
use contact_verifier::models::{Contact, VerificationUpdate};
use contact_verifier::repositories::ContactRepository;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Serves a fixed list of contacts, records every write, can be told to fail
/// the connectivity check or individual writes, and tracks method calls.
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<Vec<Contact>>>,
    writes: Arc<Mutex<Vec<VerificationUpdate>>>,
    failing_ids: Arc<Mutex<HashSet<String>>>,
    offline: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(Vec::new())),
            writes: Arc::new(Mutex::new(Vec::new())),
            failing_ids: Arc::new(Mutex::new(HashSet::new())),
            offline: Arc::new(Mutex::new(false)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add multiple contacts to the mock repository.
    pub fn add_contacts(&self, contacts_list: Vec<Contact>) {
        self.contacts.lock().unwrap().extend(contacts_list);
    }

    /// Make writes for this contact ID fail.
    pub fn fail_writes_for(&self, contact_id: &str) {
        self.failing_ids
            .lock()
            .unwrap()
            .insert(contact_id.to_string());
    }

    /// Make the connectivity check fail.
    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock().unwrap() = offline;
    }

    /// All successfully written updates, in completion order.
    pub fn written(&self) -> Vec<VerificationUpdate> {
        self.writes.lock().unwrap().clone()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn check_connection(&self) -> CrmApiResult<()> {
        self.track_call("check_connection");
        if *self.offline.lock().unwrap() {
            return Err(CrmApiError::HttpError("Connection failed".to_string()));
        }
        Ok(())
    }

    async fn find_unverified(&self, query: &StaleContactQuery) -> CrmApiResult<Vec<Contact>> {
        self.track_call("find_unverified");
        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.iter().take(query.limit).cloned().collect())
    }

    async fn write_verification(&self, update: &VerificationUpdate) -> CrmApiResult<()> {
        self.track_call("write_verification");
        if self.failing_ids.lock().unwrap().contains(&update.contact_id) {
            return Err(CrmApiError::ApiError {
                status: 500,
                message: format!("write rejected for {}", update.contact_id),
            });
        }
        self.writes.lock().unwrap().push(update.clone());
        Ok(())
    }
}
