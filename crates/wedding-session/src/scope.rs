use std::collections::BTreeMap;

use crate::SessionStoreError;

/// Trait contract for a string key-value store scoped to one browsing session.
pub trait SessionScope {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<(), SessionStoreError>;

    fn remove(&mut self, key: &str) -> Option<String>;

    fn clear(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemorySessionScope {
    entries: BTreeMap<String, String>,
    ended: bool,
}

impl InMemorySessionScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ends the browsing session: all entries are discarded and later writes
    /// are rejected.
    pub fn end_session(&mut self) {
        tracing::debug!(entries = self.entries.len(), "session ended; clearing storage");
        self.entries.clear();
        self.ended = true;
    }

    pub fn has_ended(&self) -> bool {
        self.ended
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl SessionScope for InMemorySessionScope {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SessionStoreError> {
        if self.ended {
            return Err(SessionStoreError::SessionEnded {
                key: key.to_string(),
            });
        }
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
