//! Cryptographic primitives for the capsule store
//!
//! This module provides the digest/signature engine behind record integrity:
//!
//! - **Identity**: Ed25519 keypairs (`SecretKey`/`PublicKey`) for writers and
//!   for the store's own countersignatures
//! - **Digests**: SHA-256 content fingerprints, used for content addressing
//!   and for legacy digest-only integrity proofs
//! - **Proofs**: the decoded form of a record's `signature` field, either a
//!   content digest or a real Ed25519 signature
//!
//! # Security Model
//!
//! A digest proves that bytes were not altered since the digest was computed,
//! but anyone can compute one. Only an Ed25519 proof binds a payload to a
//! writer's keypair, which is what the authorization model ultimately relies
//! on: ACL membership is meaningless if non-members can forge the proofs.
//! Digest proofs are therefore accepted but logged; see [`Proof`].

mod digest;
mod keys;
mod proof;

pub use digest::{Digest, Message, DIGEST_SIZE};
pub use keys::{KeyError, PublicKey, SecretKey, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE};
pub use proof::{Proof, ProofError};
