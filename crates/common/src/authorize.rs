//! # Authorization
//!
//! The evaluator decides whether a caller may perform an operation on a key,
//! given the governing ACL. It is a pure function over its inputs: no store
//! access, no clock, no state.
//!
//! ## Model
//!
//! - Reads are default-allowed, for every record kind. ACL entries are
//!   public material (keys and uids, no secrets), so reads of ACL records
//!   are not restricted either.
//! - Writes and deletes require an entry matching both the caller's public
//!   key and uid. A key match with the wrong uid is reported distinctly
//!   from no match at all, for diagnosability.
//! - An empty ACL denies every writer. Fail-closed.
//!
//! Resolving *which* ACL governs a key is the store protocol's job; the
//! evaluator only judges a caller against an ACL it is handed.

use crate::records::{AclValue, Key};

/// A store operation, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Read => write!(f, "read"),
            Operation::Write => write!(f, "write"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// The identity a caller presents with each operation.
///
/// The public key is an opaque encoding compared byte-for-byte against ACL
/// entries; when a record carries an Ed25519 proof the same encoding must
/// also parse as the verifying key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub public_key: String,
    pub uid: u64,
}

impl Identity {
    pub fn new(public_key: impl Into<String>, uid: u64) -> Self {
        Identity {
            public_key: public_key.into(),
            uid,
        }
    }
}

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The caller's public key appears nowhere in the governing ACL.
    NotInAcl,
    /// The caller's public key is in the ACL, but under a different uid.
    UidMismatch,
    /// A policy already exists and cannot be replaced through this path.
    PolicyExists,
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DenyReason::NotInAcl => write!(f, "not in acl"),
            DenyReason::UidMismatch => write!(f, "uid mismatch"),
            DenyReason::PolicyExists => write!(f, "policy already exists"),
        }
    }
}

/// The evaluator's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Judge `caller` performing `operation` on `key` under `acl`.
pub fn authorize(operation: Operation, key: &Key, acl: &AclValue, caller: &Identity) -> Decision {
    match operation {
        Operation::Read => Decision::Allow,
        Operation::Write | Operation::Delete => {
            let mut key_match = false;
            for entry in acl.entries() {
                if entry.public_key == caller.public_key {
                    if entry.uid == caller.uid {
                        tracing::debug!(%operation, %key, uid = caller.uid, "authorized");
                        return Decision::Allow;
                    }
                    key_match = true;
                }
            }
            let reason = if key_match {
                DenyReason::UidMismatch
            } else {
                DenyReason::NotInAcl
            };
            tracing::debug!(%operation, %key, uid = caller.uid, %reason, "denied");
            Decision::Deny(reason)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::records::{AclEntry, AclKey, DataKey};

    fn acl() -> AclValue {
        AclValue::new(vec![
            AclEntry::new("8a8e1239773", 1001),
            AclEntry::new("b2c1d3", 1002),
        ])
    }

    fn data_key() -> Key {
        Key::from(DataKey::file(["folder", "example.txt"]))
    }

    #[test]
    fn test_read_default_allow() {
        // a caller nowhere near the ACL may still read
        let caller = Identity::new("unknown", 4242);
        assert!(authorize(Operation::Read, &data_key(), &acl(), &caller).is_allow());
        let acl_key = Key::from(AclKey::new("writer1"));
        assert!(authorize(Operation::Read, &acl_key, &acl(), &caller).is_allow());
    }

    #[test]
    fn test_write_requires_exact_entry() {
        let caller = Identity::new("8a8e1239773", 1001);
        assert!(authorize(Operation::Write, &data_key(), &acl(), &caller).is_allow());
        assert!(authorize(Operation::Delete, &data_key(), &acl(), &caller).is_allow());
    }

    #[test]
    fn test_uid_mismatch_is_distinct() {
        let caller = Identity::new("8a8e1239773", 9999);
        assert_eq!(
            authorize(Operation::Write, &data_key(), &acl(), &caller),
            Decision::Deny(DenyReason::UidMismatch)
        );

        let stranger = Identity::new("ffff", 1001);
        assert_eq!(
            authorize(Operation::Write, &data_key(), &acl(), &stranger),
            Decision::Deny(DenyReason::NotInAcl)
        );
    }

    #[test]
    fn test_empty_acl_fails_closed() {
        let caller = Identity::new("8a8e1239773", 1001);
        assert_eq!(
            authorize(Operation::Write, &data_key(), &AclValue::default(), &caller),
            Decision::Deny(DenyReason::NotInAcl)
        );
    }

    #[test]
    fn test_entry_order_is_irrelevant() {
        let caller = Identity::new("b2c1d3", 1002);
        let reversed = AclValue::new(vec![
            AclEntry::new("b2c1d3", 1002),
            AclEntry::new("8a8e1239773", 1001),
        ]);
        assert_eq!(
            authorize(Operation::Write, &data_key(), &acl(), &caller),
            authorize(Operation::Write, &data_key(), &reversed, &caller),
        );
    }
}
