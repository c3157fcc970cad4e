//! Application state for the API server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Instant;

use chrono::{DateTime, Utc};

use nova_core::auth::AuthManager;
use nova_core::classifier::{KeywordClassifier, PolicyCategory, Verdict};
use nova_core::demo::ReplyBank;
use nova_core::policy::{self, PolicyRecord};

/// A stored account.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
}

/// In-memory account store keyed by lower-cased email.
///
/// Persistence is out of scope for the demo; accounts live for the process
/// lifetime.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: HashMap<String, Account>,
    next_id: u64,
}

impl AccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an account by email (case-insensitive).
    pub fn get(&self, email: &str) -> Option<&Account> {
        self.accounts.get(&email.to_lowercase())
    }

    /// Returns true if an account with this email exists.
    pub fn contains(&self, email: &str) -> bool {
        self.accounts.contains_key(&email.to_lowercase())
    }

    /// Inserts a new account and returns it.
    pub fn insert(&mut self, full_name: String, email: String, password_hash: String) -> Account {
        self.next_id += 1;
        let account = Account {
            id: format!("user-{}", self.next_id),
            full_name,
            email: email.clone(),
            password_hash,
        };
        self.accounts.insert(email.to_lowercase(), account.clone());
        account
    }

    /// Returns the number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if no accounts exist.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// One recorded gateway transaction.
#[derive(Debug, Clone)]
pub struct GatewayEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user_message: String,
    pub ai_response: String,
    pub verdict: Verdict,
    pub threat_detected: bool,
    pub policy_violations: Vec<PolicyCategory>,
    pub response_time_ms: u64,
}

/// Aggregated counters over the event log.
#[derive(Debug, Clone, Default)]
pub struct EventStats {
    pub total: u64,
    pub blocked: u64,
    pub warned: u64,
    pub successful: u64,
    pub average_response_time_ms: f64,
}

/// Append-only, in-memory log of gateway transactions.
///
/// No delete, edit, or reorder operations exist; entries accumulate for the
/// process lifetime.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<GatewayEvent>,
    seq: u64,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transaction and returns its id.
    pub fn append(
        &mut self,
        user_message: String,
        ai_response: String,
        verdict: Verdict,
        threat_detected: bool,
        policy_violations: Vec<PolicyCategory>,
        response_time_ms: u64,
    ) -> String {
        let timestamp = Utc::now();
        let id = format!("{}-{}", timestamp.timestamp_millis(), self.seq);
        self.seq += 1;

        self.events.push(GatewayEvent {
            id: id.clone(),
            timestamp,
            user_message,
            ai_response,
            verdict,
            threat_detected,
            policy_violations,
            response_time_ms,
        });

        id
    }

    /// Returns the total number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events are recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns one page of events, newest first (1-based page).
    pub fn page(&self, page: u64, limit: u64) -> Vec<GatewayEvent> {
        if limit == 0 {
            return Vec::new();
        }

        let skip = page.saturating_sub(1).saturating_mul(limit) as usize;
        self.events
            .iter()
            .rev()
            .skip(skip)
            .take(limit as usize)
            .cloned()
            .collect()
    }

    /// Computes aggregate counters over all events.
    pub fn stats(&self) -> EventStats {
        let mut stats = EventStats {
            total: self.events.len() as u64,
            ..EventStats::default()
        };

        let mut latency_sum = 0u64;
        for event in &self.events {
            match event.verdict {
                Verdict::Blocked => stats.blocked += 1,
                Verdict::Warning => stats.warned += 1,
                Verdict::Success => stats.successful += 1,
            }
            latency_sum += event.response_time_ms;
        }

        if stats.total > 0 {
            stats.average_response_time_ms = latency_sum as f64 / stats.total as f64;
        }

        stats
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Message classifier (immutable, lock-free).
    pub classifier: Arc<KeywordClassifier>,
    /// Canned assistant replies (rotation requires mutable access).
    pub replies: Arc<Mutex<ReplyBank>>,
    /// Authentication manager.
    pub auth: Arc<AuthManager>,
    /// Registered accounts.
    pub accounts: Arc<RwLock<AccountStore>>,
    /// Append-only transaction log.
    pub events: Arc<RwLock<EventLog>>,
    /// Built-in policy records.
    pub policies: Arc<Vec<PolicyRecord>>,
    /// Server start time, for uptime reporting.
    pub started: Instant,
}

impl AppState {
    /// Creates fresh application state.
    pub fn new() -> Self {
        Self {
            classifier: Arc::new(KeywordClassifier::new()),
            replies: Arc::new(Mutex::new(ReplyBank::new())),
            auth: Arc::new(AuthManager::new()),
            accounts: Arc::new(RwLock::new(AccountStore::new())),
            events: Arc::new(RwLock::new(EventLog::new())),
            policies: Arc::new(policy::builtin_records()),
            started: Instant::now(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_store_lookup_is_case_insensitive() {
        let mut store = AccountStore::new();
        store.insert(
            "User One".to_string(),
            "User@Example.com".to_string(),
            "hash".to_string(),
        );
        assert!(store.contains("user@example.com"));
        assert!(store.contains("USER@EXAMPLE.COM"));
        assert_eq!(store.get("user@example.com").unwrap().full_name, "User One");
    }

    #[test]
    fn account_ids_are_sequential() {
        let mut store = AccountStore::new();
        let a = store.insert("A".to_string(), "a@x.com".to_string(), "h".to_string());
        let b = store.insert("B".to_string(), "b@x.com".to_string(), "h".to_string());
        assert_eq!(a.id, "user-1");
        assert_eq!(b.id, "user-2");
        assert_eq!(store.len(), 2);
    }

    fn push(log: &mut EventLog, verdict: Verdict, ms: u64) {
        log.append(
            "q".to_string(),
            "a".to_string(),
            verdict,
            verdict.is_threat(),
            Vec::new(),
            ms,
        );
    }

    #[test]
    fn event_log_pages_newest_first() {
        let mut log = EventLog::new();
        for i in 0..5 {
            push(&mut log, Verdict::Success, i);
        }

        let first = log.page(1, 2);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].response_time_ms, 4);
        assert_eq!(first[1].response_time_ms, 3);

        let last = log.page(3, 2);
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].response_time_ms, 0);

        assert!(log.page(4, 2).is_empty());
    }

    #[test]
    fn event_log_page_with_zero_limit_is_empty() {
        let mut log = EventLog::new();
        push(&mut log, Verdict::Success, 1);
        assert!(log.page(1, 0).is_empty());
    }

    #[test]
    fn event_stats_count_by_verdict() {
        let mut log = EventLog::new();
        push(&mut log, Verdict::Success, 10);
        push(&mut log, Verdict::Blocked, 20);
        push(&mut log, Verdict::Warning, 30);
        push(&mut log, Verdict::Success, 40);

        let stats = log.stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.successful, 2);
        assert_eq!(stats.blocked, 1);
        assert_eq!(stats.warned, 1);
        assert_eq!(stats.average_response_time_ms, 25.0);
    }

    #[test]
    fn empty_log_has_zero_stats() {
        let stats = EventLog::new().stats();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_response_time_ms, 0.0);
    }
}
