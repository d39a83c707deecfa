use serde::{Deserialize, Serialize};

use crate::crypto::{Digest, Proof, ProofError, SecretKey};

use super::key::AclKey;

/// The signature block embedded in a data record.
///
/// `signature` is computed over exactly the bytes of the accompanying data
/// field, with no framing; mutating the data without recomputing the proof
/// invalidates the record. `writer` names the ACL record that governs the
/// signer, and `user_id` is the uid the signer claims under that ACL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Hex-encoded integrity proof; see [`Proof`] for the accepted forms.
    pub signature: String,
    /// The ACL record governing the signer. `None` leaves the record
    /// ungoverned, which the store rejects on write.
    pub writer: Option<AclKey>,
    /// The signer's claimed uid under the governing ACL.
    pub user_id: u64,
}

impl Signature {
    /// Build a digest-only signature over `data`.
    ///
    /// Binds the bytes but not a signer; see [`Proof`] for the tradeoff.
    pub fn digest_over(data: &[u8], writer: Option<AclKey>, user_id: u64) -> Self {
        Signature {
            signature: Digest::of(data).to_hex(),
            writer,
            user_id,
        }
    }

    /// Sign `data` with an Ed25519 key.
    pub fn sign_over(data: &[u8], key: &SecretKey, writer: Option<AclKey>, user_id: u64) -> Self {
        Signature {
            signature: hex::encode(key.sign(data).to_bytes()),
            writer,
            user_id,
        }
    }

    /// Decode the proof carried in the signature field.
    pub fn proof(&self) -> Result<Proof, ProofError> {
        Proof::parse(&self.signature)
    }
}
