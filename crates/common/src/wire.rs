//! Canonical wire encoding and content addressing
//!
//! Records are encoded as DAG-CBOR, which is deterministic: the same record
//! always encodes to the same bytes. That stability matters because digests
//! and fingerprints are computed over encoded bytes; an encoding that could
//! vary between runs would break signature portability.
//!
//! A [`Link`] is a CIDv1 content address (DAG-CBOR codec, SHA-256 multihash)
//! over a record's canonical encoding. The backing store may derive storage
//! locations from links; the protocol uses them to detect records that were
//! altered at rest.

use cid::Cid;
use multihash::Multihash;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::crypto::Digest;

/// Multicodec code for DAG-CBOR
pub const DAG_CBOR_CODE: u64 = 0x71;
/// Multicodec code for SHA-256
pub const SHA2_256_CODE: u64 = 0x12;

/// Errors from encoding or decoding records
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("encode error: {0}")]
    Encode(#[from] serde_ipld_dagcbor::EncodeError<std::collections::TryReserveError>),
    #[error("decode error: {0}")]
    Decode(#[from] serde_ipld_dagcbor::DecodeError<std::convert::Infallible>),
    #[error("multihash error: {0}")]
    Multihash(#[from] multihash::Error),
}

/// Types with a canonical DAG-CBOR encoding.
pub trait WireEncoded: Serialize + DeserializeOwned {
    /// Encode to canonical bytes.
    fn encode(&self) -> Result<Vec<u8>, WireError> {
        Ok(serde_ipld_dagcbor::to_vec(self)?)
    }

    /// Decode from canonical bytes.
    fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        Ok(serde_ipld_dagcbor::from_slice(bytes)?)
    }

    /// Digest of the canonical encoding.
    fn fingerprint(&self) -> Result<Digest, WireError> {
        Ok(Digest::of(self.encode()?))
    }

    /// Content address of the canonical encoding.
    fn link(&self) -> Result<Link, WireError> {
        Link::for_bytes(&self.encode()?)
    }
}

/// Content address of an encoded record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Link(Cid);

impl Link {
    /// Address a byte payload.
    pub fn for_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        let digest = Digest::of(bytes);
        let multihash = Multihash::<64>::wrap(SHA2_256_CODE, digest.as_bytes())?;
        Ok(Link(Cid::new_v1(DAG_CBOR_CODE, multihash)))
    }

    /// The underlying CID
    pub fn cid(&self) -> &Cid {
        &self.0
    }

    /// Binary form, suitable for feeding into signatures
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes()
    }
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
