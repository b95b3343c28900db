use crate::traits::KeyValueStore;
use async_trait::async_trait;
use memoira_core::{MemoiraError, MemoiraResult};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-process key-value store.
///
/// Writes can be made to fail on demand to exercise error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Value>>,
    failures_left: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            entries: Mutex::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
            failures_left: AtomicUsize::new(0),
        }
    }

    /// Make every following `set` and `remove` fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        let count = if fail { usize::MAX } else { 0 };
        self.failures_left.store(count, Ordering::SeqCst);
    }

    /// Make only the next `count` writes fail.
    pub fn fail_next_writes(&self, count: usize) {
        self.failures_left.store(count, Ordering::SeqCst);
    }

    fn check_writable(&self, key: &str) -> MemoiraResult<()> {
        let refused = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                0 => None,
                usize::MAX => Some(usize::MAX),
                n => Some(n - 1),
            })
            .is_ok();
        if refused {
            return Err(MemoiraError::Io(std::io::Error::other(format!(
                "write to {} refused",
                key
            ))));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> MemoiraResult<Option<Value>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> MemoiraResult<()> {
        self.check_writable(key)?;
        self.entries.lock().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> MemoiraResult<()> {
        self.check_writable(key)?;
        self.entries.lock().remove(key);
        Ok(())
    }

    async fn keys(&self) -> MemoiraResult<Vec<String>> {
        Ok(self.entries.lock().keys().cloned().collect())
    }
}
