//! Store seals
//!
//! When the store is configured with its own keypair, every record it
//! accepts is countersigned before it reaches the persistence engine, and
//! the seal is re-checked on every read. The persistence engine is outside
//! the trust boundary: a seal proves that a record passed this store's
//! integrity and authorization checks and was not swapped at rest.
//!
//! Byte layout fed to the seal signature, fixed for portability: the
//! record's CIDv1 link bytes, followed by the seal timestamp as a
//! big-endian u64.

use serde::{Deserialize, Serialize};

use common::crypto::{Proof, PublicKey, SecretKey};
use common::wire::Link;

/// A store countersignature over an accepted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seal {
    /// Unix timestamp (seconds) at which the record was accepted.
    pub sealed_at: u64,
    /// Hex-encoded Ed25519 signature by the store's sealing key.
    pub signature: String,
}

impl Seal {
    /// Seal a record link with the store's key.
    pub fn over(link: &Link, key: &SecretKey, sealed_at: u64) -> Self {
        let signature = hex::encode(key.sign(&Self::message(link, sealed_at)).to_bytes());
        Seal {
            sealed_at,
            signature,
        }
    }

    /// Verify this seal against a record link and the store's public key.
    ///
    /// Only real signatures count; a digest in the signature field is not a
    /// seal, since anyone could compute one.
    pub fn verify(&self, link: &Link, key: &PublicKey) -> bool {
        match Proof::parse(&self.signature) {
            Ok(Proof::Ed25519(signature)) => key
                .verify(&Self::message(link, self.sealed_at), &signature)
                .is_ok(),
            _ => false,
        }
    }

    fn message(link: &Link, sealed_at: u64) -> Vec<u8> {
        let mut msg = link.to_bytes();
        msg.extend_from_slice(&sealed_at.to_be_bytes());
        msg
    }
}
