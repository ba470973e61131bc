//! Generic namespaced key-value storage. Values are JSON documents; keys are
//! colon-separated paths such as `expenses:demo-user-001:1734200000000abc`.

mod schema;
mod sqlite;

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::error::{StoreError, StoreResult};

pub(crate) use sqlite::SqliteKv;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct KvEntry {
    pub(crate) key: String,
    pub(crate) value: Value,
}

pub(crate) trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Insert or overwrite.
    fn set(&self, key: &str, value: &Value) -> StoreResult<()>;

    /// Deleting a key that does not exist is not an error.
    fn del(&self, key: &str) -> StoreResult<()>;

    /// All entries whose key starts with `prefix`, ordered by key.
    fn get_by_prefix(&self, prefix: &str) -> StoreResult<Vec<KvEntry>>;
}

/// In-process store used by tests and by `serve --memory`.
#[derive(Default)]
pub(crate) struct MemoryKv {
    entries: Mutex<BTreeMap<String, Value>>,
}

impl MemoryKv {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, BTreeMap<String, Value>>> {
        self.entries.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> StoreResult<()> {
        self.lock()?.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn del(&self, key: &str) -> StoreResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn get_by_prefix(&self, prefix: &str) -> StoreResult<Vec<KvEntry>> {
        Ok(self
            .lock()?
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| KvEntry {
                key: k.clone(),
                value: v.clone(),
            })
            .collect())
    }
}
