//! Integrity proofs
//!
//! The `signature` field of a data record is a lowercase hex string holding
//! one of two proof forms, discriminated by decoded length:
//!
//! - 32 bytes: a SHA-256 content digest of exactly the record's data bytes
//! - 64 bytes: an Ed25519 signature over exactly the record's data bytes
//!
//! Digest proofs bind bytes but not a signer; anyone can recompute one. They
//! are kept for content addressing and for writers that have not migrated to
//! real keys, and every acceptance is logged. Ed25519 proofs bind the payload
//! to the signer's keypair and are the intended write path.

use ed25519_dalek::SIGNATURE_LENGTH;

use super::digest::{Digest, DIGEST_SIZE};
use super::keys::PublicKey;

/// Errors from decoding a proof string
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ProofError {
    #[error("proof hex decode error")]
    HexDecode,
    #[error("unsupported proof length: {0} bytes")]
    UnsupportedLength(usize),
}

/// A decoded integrity proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Proof {
    /// Content digest of the payload (no signer binding)
    Digest(Digest),
    /// Ed25519 signature over the payload
    Ed25519(ed25519_dalek::Signature),
}

impl Proof {
    /// Decode a proof from its hex rendering.
    pub fn parse(hex_str: &str) -> Result<Self, ProofError> {
        let bytes = hex::decode(hex_str).map_err(|_| ProofError::HexDecode)?;
        match bytes.len() {
            DIGEST_SIZE => {
                let mut buff = [0u8; DIGEST_SIZE];
                buff.copy_from_slice(&bytes);
                Ok(Proof::Digest(Digest::from(buff)))
            }
            SIGNATURE_LENGTH => {
                let mut buff = [0u8; SIGNATURE_LENGTH];
                buff.copy_from_slice(&bytes);
                Ok(Proof::Ed25519(ed25519_dalek::Signature::from_bytes(&buff)))
            }
            n => Err(ProofError::UnsupportedLength(n)),
        }
    }

    /// Verify this proof against a payload.
    ///
    /// Digest proofs recompute the payload digest and need no signer. Ed25519
    /// proofs verify against `signer` and fail when no signer key is
    /// available. Pure, no side effects beyond logging.
    pub fn verify(&self, payload: &[u8], signer: Option<&PublicKey>) -> bool {
        match self {
            Proof::Digest(digest) => {
                let ok = Digest::of(payload) == *digest;
                if ok {
                    tracing::warn!(
                        "accepted content digest proof; payload is not bound to a signer"
                    );
                }
                ok
            }
            Proof::Ed25519(signature) => match signer {
                Some(key) => key.verify(payload, signature).is_ok(),
                None => false,
            },
        }
    }

    /// Whether this proof binds the payload to a signer identity.
    pub fn binds_signer(&self) -> bool {
        matches!(self, Proof::Ed25519(_))
    }
}
