use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{ChecklistError, Result};

/// String key-value storage with the shape of the browser's `localStorage`.
///
/// Writes are synchronous and either fully apply or leave the stored value
/// as it was.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// In-memory storage with an optional byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses writes once keys plus values exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            items: BTreeMap::new(),
            quota: Some(bytes),
        }
    }

    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            let replaced = self.items.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > quota {
                debug!(key, needed, quota, "memory storage quota exceeded");
                return Err(ChecklistError::Storage {
                    key: key.to_string(),
                    reason: format!("quota of {quota} bytes exceeded ({needed} needed)"),
                });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut storage = MemoryStorage::new();
        storage.set_item("a", "1").expect("set");
        assert_eq!(storage.get_item("a").expect("get").as_deref(), Some("1"));

        storage.remove_item("a").expect("remove");
        assert!(storage.get_item("a").expect("get").is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_old_value() {
        let mut storage = MemoryStorage::with_quota(8);
        storage.set_item("k", "short").expect("fits");

        let err = storage
            .set_item("k", "much too long")
            .expect_err("over quota");
        assert!(matches!(err, ChecklistError::Storage { .. }));
        assert_eq!(storage.get_item("k").expect("get").as_deref(), Some("short"));
    }

    #[test]
    fn quota_counts_replaced_value_once() {
        let mut storage = MemoryStorage::with_quota(6);
        storage.set_item("k", "12345").expect("fits");
        storage.set_item("k", "54321").expect("replacement fits");
        assert_eq!(storage.used_bytes(), 6);
    }
}
