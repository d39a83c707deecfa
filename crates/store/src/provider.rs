use std::fmt::{Debug, Display};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use common::records::{Key, Value};
use common::wire::Link;

use crate::seal::Seal;

/// The unit of storage handed to a persistence engine: the value itself,
/// its content address, and the store seal when sealing is configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub value: Value,
    pub link: Link,
    pub seal: Option<Seal>,
}

/// The logical contract a persistence engine must satisfy.
///
/// Implementations store records exactly as given and return them exactly as
/// stored; they are trusted for durability, never for integrity (the
/// protocol re-checks content addresses and seals on read). Operations must
/// be individually atomic per key. Engines may derive their physical layout
/// from the record link (content addressing) or from the key, as they
/// choose.
#[async_trait]
pub trait StoreProvider: Send + Sync + Debug + Clone + 'static {
    type Error: Display + Debug + Send;

    /// Fetch the record stored under `key`, if any.
    async fn get(&self, key: &Key) -> Result<Option<StoredRecord>, Self::Error>;

    /// Store `record` under `key`, replacing any previous record.
    async fn put(&self, key: Key, record: StoredRecord) -> Result<(), Self::Error>;

    /// Remove the record stored under `key`.
    ///
    /// # Returns
    /// * `Ok(true)` - A record existed and was removed
    /// * `Ok(false)` - No record was stored under the key
    async fn delete(&self, key: &Key) -> Result<bool, Self::Error>;
}
