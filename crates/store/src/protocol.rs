//! The authorized put/get protocol
//!
//! [`Store`] composes the record model, the integrity proofs, and the
//! authorization evaluator in front of a pluggable persistence engine.
//! Nothing reaches the engine until its shape has been validated, its proof
//! has verified, and its governing ACL has allowed the caller.
//!
//! ## Ordering
//!
//! Operations on different keys proceed fully in parallel. Writes and
//! deletes against the same key are serialized through a per-key lock, so
//! authorization decisions and the stored outcome are consistent with a
//! single total order. The persistence call is the only suspension point
//! and is bounded by the configured timeout; once it begins, the write is
//! not cancelled from inside the protocol.
//!
//! ## Reads
//!
//! Reads are default-allowed, so a `get` never returns `Denied`; a missing
//! key is always `NotFound` and never reveals whether the key space exists.
//! Records are still re-checked on the way out: the content address must
//! match the stored value, and the seal must verify when sealing is
//! configured.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::time::timeout;

use common::authorize::{authorize, Decision, DenyReason, Identity, Operation};
use common::crypto::{Digest, PublicKey, SecretKey};
use common::records::{AclKey, AclValue, DataValue, Key, RecordError, Value};
use common::wire::WireEncoded;

use crate::error::StoreError;
use crate::provider::{StoreProvider, StoredRecord};
use crate::seal::Seal;

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Bound on every persistence-engine call.
    pub timeout: Duration,
    /// When set, accepted records are countersigned and seals are verified
    /// on read.
    pub sealing_key: Option<SecretKey>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            timeout: Duration::from_secs(1),
            sealing_key: None,
        }
    }
}

impl StoreConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_sealing_key(mut self, key: SecretKey) -> Self {
        self.sealing_key = Some(key);
        self
    }
}

/// The authorized store protocol over a persistence engine `P`.
#[derive(Clone)]
pub struct Store<P: StoreProvider> {
    provider: P,
    config: StoreConfig,
    /// Per-key write locks, keyed by the key's fingerprint.
    locks: Arc<parking_lot::Mutex<HashMap<Digest, Arc<tokio::sync::Mutex<()>>>>>,
}

impl<P: StoreProvider> Store<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, StoreConfig::default())
    }

    pub fn with_config(provider: P, config: StoreConfig) -> Self {
        Store {
            provider,
            config,
            locks: Arc::new(parking_lot::Mutex::new(HashMap::new())),
        }
    }

    /// Direct handle to the persistence engine. Bypasses every check; for
    /// diagnostics and tests only.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Store a record.
    ///
    /// Validates the record shape, verifies the integrity proof, resolves
    /// the governing ACL, and authorizes the caller for `Write` before
    /// anything is persisted. On any failure the store is left unchanged;
    /// there are no partial writes.
    pub async fn put(
        &self,
        key: Key,
        value: Value,
        caller: &Identity,
    ) -> Result<(), StoreError<P::Error>> {
        key.validate()?;
        value.validate()?;
        value.matches_key(&key)?;

        let lock = self.lock_for(&key)?;
        let _guard = lock.lock().await;

        match &value {
            Value::Data(data_value) => {
                self.check_data_integrity(&key, data_value, caller)?;
                if data_value.signature.user_id != caller.uid {
                    tracing::debug!(
                        %key,
                        claimed = data_value.signature.user_id,
                        caller = caller.uid,
                        "signature user id does not match caller"
                    );
                    return Err(StoreError::Denied(DenyReason::UidMismatch));
                }
                let writer = data_value.signature.writer.clone().ok_or_else(|| {
                    StoreError::PolicyNotFound("data record carries no writer reference".into())
                })?;
                let acl = self.governing_acl(&writer).await?;
                self.check(Operation::Write, &key, &acl, caller)?;
            }
            Value::Acl(_) => {
                let Key::Acl(acl_key) = &key else {
                    return Err(RecordError::KindMismatch {
                        key: key.kind(),
                        value: value.kind(),
                    }
                    .into());
                };
                // an ACL record is governed by its own current state; only
                // existing members may replace it, and the bootstrap path is
                // the way the first version comes to exist
                let acl = self.governing_acl(acl_key).await?;
                self.check(Operation::Write, &key, &acl, caller)?;
            }
        }

        let record = self.finalize(value)?;
        tracing::debug!(%key, link = %record.link, "storing record");
        self.provider_put(key, record).await
    }

    /// Fetch a record.
    ///
    /// A missing key is `NotFound`. A record that fails its at-rest checks
    /// (content address, seal) is `IntegrityFailure` rather than data.
    pub async fn get(&self, key: &Key, caller: &Identity) -> Result<Value, StoreError<P::Error>> {
        key.validate()?;

        let record = self.provider_get(key).await?.ok_or(StoreError::NotFound)?;
        self.check_at_rest(key, &record)?;

        let acl = self.read_acl(key, &record).await;
        self.check(Operation::Read, key, &acl, caller)?;

        Ok(record.value)
    }

    /// Remove a record.
    ///
    /// Runs the same authorization as `put`: the governing ACL is resolved
    /// from the stored record and the caller must be a member.
    pub async fn delete(&self, key: &Key, caller: &Identity) -> Result<(), StoreError<P::Error>> {
        key.validate()?;

        let lock = self.lock_for(key)?;
        let _guard = lock.lock().await;

        let record = self.provider_get(key).await?.ok_or(StoreError::NotFound)?;
        let acl = match &record.value {
            Value::Acl(acl) => acl.clone(),
            Value::Data(data_value) => {
                let writer = data_value.signature.writer.clone().ok_or_else(|| {
                    StoreError::PolicyNotFound("stored record carries no writer reference".into())
                })?;
                self.governing_acl(&writer).await?
            }
        };
        self.check(Operation::Delete, key, &acl, caller)?;

        tracing::debug!(%key, "deleting record");
        if !self.provider_delete(key).await? {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Provision a genesis ACL, outside the authorized write path.
    ///
    /// ACL records are otherwise governed by their own current state, which
    /// leaves no in-band way to create the first version. This is that
    /// out-of-band way: deployment tooling calls it before any writer can
    /// use the namespace. It refuses to replace an ACL that already exists;
    /// replacement must go through `put` and be authorized by the current
    /// members.
    pub async fn bootstrap_acl(
        &self,
        acl_key: AclKey,
        acl: AclValue,
    ) -> Result<(), StoreError<P::Error>> {
        let key = Key::Acl(acl_key);
        key.validate()?;
        acl.validate()?;

        let lock = self.lock_for(&key)?;
        let _guard = lock.lock().await;

        if self.provider_get(&key).await?.is_some() {
            return Err(StoreError::Denied(DenyReason::PolicyExists));
        }

        tracing::info!(%key, entries = acl.len(), "provisioning bootstrap acl");
        let record = self.finalize(Value::Acl(acl))?;
        self.provider_put(key, record).await
    }

    /// Verify a data record's proof against its bytes and the caller's key.
    fn check_data_integrity(
        &self,
        key: &Key,
        value: &DataValue,
        caller: &Identity,
    ) -> Result<(), StoreError<P::Error>> {
        let proof = match value.signature.proof() {
            Ok(proof) => proof,
            Err(error) => {
                tracing::warn!(%key, %error, "undecodable data proof; treating as tampering");
                return Err(StoreError::IntegrityFailure);
            }
        };
        // for real signatures the caller is the claimed signer; an identity
        // that does not parse as a verifying key cannot verify anything
        let signer = PublicKey::from_hex(&caller.public_key).ok();
        if !proof.verify(&value.data, signer.as_ref()) {
            tracing::warn!(%key, "data proof failed to verify; potential tampering");
            return Err(StoreError::IntegrityFailure);
        }
        Ok(())
    }

    /// At-rest checks on a record coming back from the persistence engine.
    fn check_at_rest(
        &self,
        key: &Key,
        record: &StoredRecord,
    ) -> Result<(), StoreError<P::Error>> {
        let link = record.value.link()?;
        if link != record.link {
            tracing::warn!(
                %key,
                stored = %record.link,
                actual = %link,
                "stored record does not match its content address; potential tampering"
            );
            return Err(StoreError::IntegrityFailure);
        }
        if let Some(sealing_key) = &self.config.sealing_key {
            let sealed = record
                .seal
                .as_ref()
                .map(|seal| seal.verify(&record.link, &sealing_key.public()))
                .unwrap_or(false);
            if !sealed {
                tracing::warn!(%key, "record seal missing or invalid; potential tampering");
                return Err(StoreError::IntegrityFailure);
            }
        }
        Ok(())
    }

    /// Resolve the ACL governing `acl_key`, failing when none is provisioned.
    async fn governing_acl(
        &self,
        acl_key: &AclKey,
    ) -> Result<AclValue, StoreError<P::Error>> {
        let key = Key::Acl(acl_key.clone());
        match self.provider_get(&key).await? {
            Some(record) => {
                // a tampered ACL must not authorize anyone
                self.check_at_rest(&key, &record)?;
                match record.value {
                    Value::Acl(acl) => Ok(acl),
                    Value::Data(_) => {
                        tracing::warn!(%key, "record under acl key is not an acl");
                        Err(StoreError::PolicyNotFound(format!(
                            "record under {} is not an acl",
                            key
                        )))
                    }
                }
            }
            None => Err(StoreError::PolicyNotFound(format!(
                "no acl provisioned for {}",
                key
            ))),
        }
    }

    /// Best-effort ACL resolution for read authorization. Reads are
    /// default-allowed, so an unresolvable ACL falls back to the empty
    /// (fail-closed for writes) ACL instead of failing the read.
    async fn read_acl(&self, key: &Key, record: &StoredRecord) -> AclValue {
        match &record.value {
            Value::Acl(acl) => acl.clone(),
            Value::Data(data_value) => match &data_value.signature.writer {
                Some(writer) => match self.governing_acl(writer).await {
                    Ok(acl) => acl,
                    Err(_) => {
                        tracing::debug!(%key, "governing acl unavailable for read");
                        AclValue::default()
                    }
                },
                None => AclValue::default(),
            },
        }
    }

    fn check(
        &self,
        operation: Operation,
        key: &Key,
        acl: &AclValue,
        caller: &Identity,
    ) -> Result<(), StoreError<P::Error>> {
        match authorize(operation, key, acl, caller) {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(StoreError::Denied(reason)),
        }
    }

    /// Attach the content address and, when configured, the store seal.
    fn finalize(&self, value: Value) -> Result<StoredRecord, StoreError<P::Error>> {
        let link = value.link()?;
        let seal = self
            .config
            .sealing_key
            .as_ref()
            .map(|sealing_key| Seal::over(&link, sealing_key, unix_now()));
        Ok(StoredRecord { value, link, seal })
    }

    /// Hand out the lock serializing writes to `key`.
    fn lock_for(
        &self,
        key: &Key,
    ) -> Result<Arc<tokio::sync::Mutex<()>>, StoreError<P::Error>> {
        let fingerprint = key.fingerprint()?;
        let mut locks = self.locks.lock();
        // drop locks nobody holds before growing the table
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Ok(locks
            .entry(fingerprint)
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone())
    }

    async fn provider_get(
        &self,
        key: &Key,
    ) -> Result<Option<StoredRecord>, StoreError<P::Error>> {
        timeout(self.config.timeout, self.provider.get(key))
            .await
            .map_err(|_| StoreError::StorageTimeout)?
            .map_err(StoreError::StorageFailure)
    }

    async fn provider_put(
        &self,
        key: Key,
        record: StoredRecord,
    ) -> Result<(), StoreError<P::Error>> {
        timeout(self.config.timeout, self.provider.put(key, record))
            .await
            .map_err(|_| StoreError::StorageTimeout)?
            .map_err(StoreError::StorageFailure)
    }

    async fn provider_delete(&self, key: &Key) -> Result<bool, StoreError<P::Error>> {
        timeout(self.config.timeout, self.provider.delete(key))
            .await
            .map_err(|_| StoreError::StorageTimeout)?
            .map_err(StoreError::StorageFailure)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
