use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{KeyValueStore, StorageError};

#[derive(Default)]
struct MemoryState {
    values: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
    write_count: usize,
}

/// Volatile key-value store.
///
/// Used in tests to inspect raw stored values and to simulate an unavailable
/// store for reads or writes.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make all subsequent reads fail
    pub fn fail_reads(&self, fail: bool) {
        self.state.lock().unwrap().fail_reads = fail;
    }

    /// Make all subsequent writes fail
    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().unwrap().fail_writes = fail;
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.state
            .lock()
            .unwrap()
            .values
            .insert(key.to_string(), value.to_string());
    }

    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.state.lock().unwrap().values.get(key).cloned()
    }

    /// Number of successful writes
    pub fn write_count(&self) -> usize {
        self.state.lock().unwrap().write_count
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(StorageError::Read("store unavailable".to_string()));
        }
        Ok(state.values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(StorageError::Write("store unavailable".to_string()));
        }
        state.values.insert(key.to_string(), value.to_string());
        state.write_count += 1;
        Ok(())
    }
}
