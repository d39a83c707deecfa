//! Shared test utilities for store protocol integration tests
#![allow(dead_code)]

use common::authorize::Identity;
use common::crypto::SecretKey;
use common::records::{
    AclEntry, AclKey, AclValue, DataKey, DataValue, Key, Signature, Value,
};
use store::{MemoryStoreProvider, Store, StoreConfig, StoreProvider};

/// Write id used by most tests
pub const WRITER: &str = "writer1";

/// Install a log subscriber for test debugging; honors RUST_LOG
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Set up a store over a fresh memory provider
pub fn test_store() -> Store<MemoryStoreProvider> {
    init_tracing();
    Store::new(MemoryStoreProvider::new())
}

/// Set up a store that countersigns accepted records
pub fn sealed_store(sealing_key: SecretKey) -> Store<MemoryStoreProvider> {
    init_tracing();
    Store::with_config(
        MemoryStoreProvider::new(),
        StoreConfig::default().with_sealing_key(sealing_key),
    )
}

/// Provision the governing ACL for [`WRITER`] with the given entries
pub async fn bootstrap(store: &Store<MemoryStoreProvider>, entries: Vec<AclEntry>) {
    bootstrap_on(store, entries).await;
}

/// Same, for stores over any provider
pub async fn bootstrap_on<P: StoreProvider>(store: &Store<P>, entries: Vec<AclEntry>) {
    store
        .bootstrap_acl(AclKey::new(WRITER), AclValue::new(entries))
        .await
        .unwrap();
}

/// The opaque-key caller used across the digest-proof tests
pub fn digest_identity() -> Identity {
    Identity::new("8a8e1239773", 1001)
}

/// An identity backed by a real keypair
pub fn keyed_identity(key: &SecretKey, uid: u64) -> Identity {
    Identity::new(key.public().to_hex(), uid)
}

/// A data value carrying a digest proof, governed by [`WRITER`]
pub fn digest_value(data: &[u8], user_id: u64) -> Value {
    Value::Data(DataValue::new(
        data.to_vec(),
        Signature::digest_over(data, Some(AclKey::new(WRITER)), user_id),
    ))
}

/// A data value signed with an Ed25519 key, governed by [`WRITER`]
pub fn signed_value(data: &[u8], key: &SecretKey, user_id: u64) -> Value {
    Value::Data(DataValue::new(
        data.to_vec(),
        Signature::sign_over(data, key, Some(AclKey::new(WRITER)), user_id),
    ))
}

/// Key for a file under the test folder
pub fn file_key(name: &str) -> Key {
    Key::from(DataKey::file(["folder", name]))
}
