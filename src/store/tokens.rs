use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::Result;

use super::LocalStore;

/// Durable string key-value storage for client credentials.
pub trait TokenStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl TokenStorage for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let st = self.read_state()?;
        Ok(st.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut st = self.read_state()?;
        st.entries.insert(key.to_string(), value.to_string());
        self.write_state(&st)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut st = self.read_state()?;
        if st.entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_state(&st)
    }
}

/// Process-local storage for tests and one-shot clients.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}
