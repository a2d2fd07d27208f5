use std::collections::HashMap;
use std::hash::Hash;
use tokio::sync::Mutex;

use crate::models::UserInfo;

/// Write-once, never-evicted map. The first value stored for a key wins.
///
/// The lock is only held for the lookup or insert itself, never across a
/// remote call, so two tasks missing on the same key may both fetch; the
/// second insert is discarded and both observe the first value.
pub struct OnceCache<K, V> {
    entries: Mutex<HashMap<K, V>>,
}

impl<K: Eq + Hash, V: Clone> OnceCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.entries.lock().await.get(key).cloned()
    }

    /// Stores `value` unless the key is already present; returns what is cached.
    pub async fn insert(&self, key: K, value: V) -> V {
        self.entries.lock().await.entry(key).or_insert(value).clone()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

impl<K: Eq + Hash, V: Clone> Default for OnceCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Username to profile lookup result, including the `NotFound` sentinel.
pub type UserCache = OnceCache<String, UserInfo>;

/// Caller-defined key to ordered language names.
pub type LanguageCache = OnceCache<String, Vec<String>>;
