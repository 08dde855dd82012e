use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::{KeyValueStore, Result};

/// A store that keeps every record in memory.
///
/// Useful for tests and for sessions that should not touch the disk.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    records: BTreeMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one record.
    pub fn with_record(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.records.insert(key.into(), value.into());
        self
    }

    /// Peek at a record without going through the async interface.
    pub fn record(&self, key: &str) -> Option<&str> {
        self.records.get(key).map(String::as_str)
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
