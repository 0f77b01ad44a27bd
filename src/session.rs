//! In-memory session state for one harness run
//!
//! Holds the auth token and the identifiers of entities created earlier in
//! the run, so later scenarios can reference them. Passed explicitly to each
//! scenario rather than living in ambient global state; discarded when the
//! process exits.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Session {
    token: Option<String>,
    entity_ids: HashMap<String, i64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Record the identifier of a just-created entity under its logical key,
    /// e.g. `member_id` or `customer_id`.
    pub fn record_id(&mut self, key: &str, id: i64) {
        self.entity_ids.insert(key.to_string(), id);
    }

    pub fn id(&self, key: &str) -> Option<i64> {
        self.entity_ids.get(key).copied()
    }
}
