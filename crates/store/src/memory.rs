use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use common::records::Key;
use common::wire::Link;

use crate::provider::{StoreProvider, StoredRecord};

/// In-memory persistence engine backed by HashMaps.
///
/// The reference provider: used by tests and as the model other engines are
/// checked against. Alongside the primary key map it maintains a content
/// index from record links back to keys, mirroring engines that lay records
/// out by content address.
#[derive(Debug, Clone)]
pub struct MemoryStoreProvider {
    inner: Arc<RwLock<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    /// Primary map: key -> stored record
    records: HashMap<Key, StoredRecord>,
    /// Content index: record link -> key
    content_index: HashMap<Link, Key>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryStoreProviderError {
    #[error("memory provider error: {0}")]
    Internal(String),
}

impl MemoryStoreProvider {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryStoreInner::default())),
        }
    }

    /// Look up the key a content link resolves to, if the record is present.
    pub fn key_for_link(&self, link: &Link) -> Result<Option<Key>, MemoryStoreProviderError> {
        let inner = self.inner.read().map_err(|e| {
            MemoryStoreProviderError::Internal(format!("failed to acquire read lock: {}", e))
        })?;
        Ok(inner.content_index.get(link).cloned())
    }
}

impl Default for MemoryStoreProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreProvider for MemoryStoreProvider {
    type Error = MemoryStoreProviderError;

    async fn get(&self, key: &Key) -> Result<Option<StoredRecord>, Self::Error> {
        let inner = self.inner.read().map_err(|e| {
            MemoryStoreProviderError::Internal(format!("failed to acquire read lock: {}", e))
        })?;

        Ok(inner.records.get(key).cloned())
    }

    async fn put(&self, key: Key, record: StoredRecord) -> Result<(), Self::Error> {
        let mut inner = self.inner.write().map_err(|e| {
            MemoryStoreProviderError::Internal(format!("failed to acquire write lock: {}", e))
        })?;

        let link = record.link;
        if let Some(previous) = inner.records.insert(key.clone(), record) {
            inner.content_index.remove(&previous.link);
        }
        inner.content_index.insert(link, key);

        Ok(())
    }

    async fn delete(&self, key: &Key) -> Result<bool, Self::Error> {
        let mut inner = self.inner.write().map_err(|e| {
            MemoryStoreProviderError::Internal(format!("failed to acquire write lock: {}", e))
        })?;

        match inner.records.remove(key) {
            Some(previous) => {
                inner.content_index.remove(&previous.link);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::records::{AclEntry, AclKey, AclValue, Value};
    use common::wire::WireEncoded;

    fn record(value: Value) -> StoredRecord {
        let link = value.link().unwrap();
        StoredRecord {
            value,
            link,
            seal: None,
        }
    }

    fn acl_record(uid: u64) -> StoredRecord {
        record(Value::Acl(AclValue::new(vec![AclEntry::new("pk", uid)])))
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let provider = MemoryStoreProvider::new();
        let key = Key::from(AclKey::new("writer1"));
        let stored = acl_record(1001);

        assert!(provider.get(&key).await.unwrap().is_none());

        provider.put(key.clone(), stored.clone()).await.unwrap();
        assert_eq!(provider.get(&key).await.unwrap(), Some(stored));

        assert!(provider.delete(&key).await.unwrap());
        assert!(provider.get(&key).await.unwrap().is_none());
        assert!(!provider.delete(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_content_index_tracks_replacement() {
        let provider = MemoryStoreProvider::new();
        let key = Key::from(AclKey::new("writer1"));

        let first = acl_record(1001);
        provider.put(key.clone(), first.clone()).await.unwrap();
        assert_eq!(provider.key_for_link(&first.link).unwrap(), Some(key.clone()));

        // replacing the record retires the old link
        let second = acl_record(1002);
        provider.put(key.clone(), second.clone()).await.unwrap();
        assert_eq!(provider.key_for_link(&first.link).unwrap(), None);
        assert_eq!(provider.key_for_link(&second.link).unwrap(), Some(key.clone()));

        provider.delete(&key).await.unwrap();
        assert_eq!(provider.key_for_link(&second.link).unwrap(), None);
    }
}
