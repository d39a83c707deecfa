//! # ACL records
//!
//! An ACL entry binds a writer's public key and numeric user id to write
//! permission on a namespace. Entries carry the key in an opaque string
//! encoding; the evaluator compares encodings, it never interprets them.
//!
//! Order of entries is preserved for audit and display, but evaluation is a
//! pure membership test; reordering entries never changes a decision.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::RecordError;

/// One ACL entry: a `(public key, uid)` pair granted write access.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AclEntry {
    /// Signer's public key, opaque encoding.
    pub public_key: String,
    /// Numeric user id the grant is scoped to.
    pub uid: u64,
}

impl AclEntry {
    pub fn new(public_key: impl Into<String>, uid: u64) -> Self {
        AclEntry {
            public_key: public_key.into(),
            uid,
        }
    }
}

/// The entry list of an ACL record.
///
/// An empty list is a valid shape: it denies every writer (fail-closed).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclValue {
    entries: Vec<AclEntry>,
}

impl AclValue {
    pub fn new(entries: Vec<AclEntry>) -> Self {
        AclValue { entries }
    }

    pub fn entries(&self) -> &[AclEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Add an entry. Duplicates are caught by [`AclValue::validate`], not
    /// here, so a caller can build a list and validate once.
    pub fn add_entry(&mut self, entry: AclEntry) {
        self.entries.push(entry);
    }

    /// Check the shape invariants: `(public_key, uid)` pairs must be unique
    /// within one record.
    pub fn validate(&self) -> Result<(), RecordError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert((entry.public_key.as_str(), entry.uid)) {
                return Err(RecordError::DuplicateAclEntry(
                    entry.public_key.clone(),
                    entry.uid,
                ));
            }
        }
        Ok(())
    }
}
