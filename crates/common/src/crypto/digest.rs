//! Content digests
//!
//! A [`Digest`] is the deterministic SHA-256 fingerprint of a byte payload,
//! rendered as lowercase hex. Digests are used two ways:
//! - content addressing: storage locations derive from the digest of the
//!   canonical encoding (see [`crate::wire`])
//! - legacy integrity proofs: a data record may carry the digest of its own
//!   bytes in place of a real signature (see [`super::Proof`])

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

/// Size of a SHA-256 digest in bytes
pub const DIGEST_SIZE: usize = 32;

/// A 256-bit content digest.
///
/// Deterministic: the same payload always produces the same digest, including
/// the empty payload. This is a fingerprint of bytes, not a signature; it
/// carries no signer identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// Digest a byte payload. Never fails, for any input.
    pub fn of(payload: impl AsRef<[u8]>) -> Self {
        Digest(Sha256::digest(payload.as_ref()).into())
    }

    /// The raw digest bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Lowercase hex rendering
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Digest(bytes)
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

/// Diagnostic envelope pairing a payload with its digest.
///
/// Not part of the authorized-store contract; exists to demonstrate and
/// sanity-check the digest engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub data: String,
    pub signature: String,
}

impl Message {
    /// Build a message whose signature field is the digest of its data.
    pub fn new(data: impl Into<String>) -> Self {
        let data = data.into();
        let signature = Digest::of(data.as_bytes()).to_hex();
        Message { data, signature }
    }

    /// Check the signature field against the data.
    pub fn verify(&self) -> bool {
        Digest::of(self.data.as_bytes()).to_hex() == self.signature
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_digest_deterministic() {
        let payload = b"example txt data";
        assert_eq!(Digest::of(payload), Digest::of(payload));
        assert_ne!(Digest::of(payload), Digest::of(b"example txt data!"));
    }

    #[test]
    fn test_digest_empty_payload() {
        // SHA-256 of the empty string
        assert_eq!(
            Digest::of(b"").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_message_digest_demo() {
        let message = Message::new("test");
        assert_eq!(message.data, "test");
        // SHA-256 of "test"
        assert_eq!(
            message.signature,
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
        assert!(message.verify());

        let mut tampered = message.clone();
        tampered.data = "Test".to_string();
        assert!(!tampered.verify());
    }
}
