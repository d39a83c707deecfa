//! Record model
//!
//! Keys and values are closed tagged unions:
//!
//! - [`Key::Acl`] names the ACL record governing a writer namespace
//! - [`Key::Data`] names a filesystem object by its path components
//! - [`Value::Acl`] holds the entry list of an ACL record
//! - [`Value::Data`] holds raw bytes plus their [`Signature`] block
//!
//! Every consumer matches all variants; adding a record kind is a compile
//! error until each consumer handles it. Shape invariants (non-empty paths,
//! unique ACL entries, key/value kind pairing) are checked by `validate`
//! before any record enters the store.

mod acl;
mod key;
mod signature;
mod value;

pub use acl::{AclEntry, AclValue};
pub use key::{AclKey, DataKey, Key};
pub use signature::Signature;
pub use value::{DataValue, Value};

/// Shape-invariant violations. These are caller bugs: a malformed record is
/// rejected outright and retrying the same record cannot succeed.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("empty write id")]
    EmptyWriteId,
    #[error("empty path")]
    EmptyPath,
    #[error("empty path segment at index {0}")]
    EmptySegment(usize),
    #[error("duplicate acl entry for ({0}, {1})")]
    DuplicateAclEntry(String, u64),
    #[error("key kind {key} does not match value kind {value}")]
    KindMismatch {
        key: &'static str,
        value: &'static str,
    },
}
