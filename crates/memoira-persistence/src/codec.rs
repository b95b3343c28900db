//! Typed access to the key-value store.

use crate::traits::{KeyValueStore, StorageKey};
use memoira_core::{MemoiraError, MemoiraResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Decode the value stored under `key`.
///
/// Returns None when the key is absent. A value that is present but does not
/// decode is an error naming the key; the stored value is left untouched.
pub async fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: StorageKey,
) -> MemoiraResult<Option<T>> {
    let Some(value) = store.get(key.as_str()).await? else {
        return Ok(None);
    };
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| MemoiraError::Serialization(format!("{}: {}", key, e)))
}

/// Like `load`, but an undecodable value is logged and treated as absent.
/// Only for scalar settings, where falling back to the default loses nothing
/// the user cannot set again.
pub async fn load_lenient<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: StorageKey,
) -> MemoiraResult<Option<T>> {
    match load(store, key).await {
        Err(MemoiraError::Serialization(message)) => {
            tracing::warn!("Ignoring undecodable value under {}", message);
            Ok(None)
        }
        other => other,
    }
}

/// Encode and write `value` under `key`. Any failure is reported as a
/// persistence error naming the key.
pub async fn save<T: Serialize + Sync>(
    store: &dyn KeyValueStore,
    key: StorageKey,
    value: &T,
) -> MemoiraResult<()> {
    let encoded =
        serde_json::to_value(value).map_err(|e| MemoiraError::persistence(key.as_str(), e))?;
    store.set(key.as_str(), encoded).await.map_err(|e| match e {
        MemoiraError::Persistence { .. } => e,
        other => MemoiraError::persistence(key.as_str(), other),
    })
}
