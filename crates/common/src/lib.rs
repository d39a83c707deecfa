/**
 * Authorization evaluator.
 *  Pure allow/deny decisions for a caller
 *  against a governing ACL.
 */
pub mod authorize;
/**
 * Cryptographic types and operations.
 *  - Ed25519 key wrappers
 *  - SHA-256 content digests
 *  - Integrity proofs (digest or signature)
 */
pub mod crypto;
/**
 * The record model: Key and Value tagged
 *  unions, ACL entries, and the signature
 *  block carried by data records.
 */
pub mod records;
/**
 * Canonical DAG-CBOR encoding and CID
 *  content addressing for records.
 */
pub mod wire;

pub mod prelude {
    pub use crate::authorize::{authorize, Decision, DenyReason, Identity, Operation};
    pub use crate::crypto::{Digest, Message, Proof, PublicKey, SecretKey};
    pub use crate::records::{
        AclEntry, AclKey, AclValue, DataKey, DataValue, Key, RecordError, Signature, Value,
    };
    pub use crate::wire::{Link, WireEncoded, WireError};
}
