//! Hash primitives used by the Pillar ledger.
//!
//! This crate provides:
//! - Fixed-size hash values (`Hash256`, `Hash160`) with validated construction
//! - Bounded pools of reusable SHA-256 and RIPEMD-160 engines
//! - Hash combinators on a `Hasher` that owns those pools
//! - Merkle roots with zero-hash padding, and proofs of inclusion
//!
//! None of the public APIs in this crate perform network or filesystem I/O.

/// Pool sizes for a `Hasher`.
pub mod config;
/// Error type shared by every module.
pub mod errors;
/// Hash combinators and the `Hashable` trait.
pub mod hashing;
/// Merkle root construction.
pub mod merkle;
/// Bounded pools of reusable digest engines.
pub mod pool;
/// Proofs of inclusion against a merkle root.
pub mod proofs;
/// Serde support for fixed hashes.
pub mod serialization;
/// Fixed-size hash values.
pub mod types;

pub use config::HasherConfig;
pub use errors::CipherError;
pub use hashing::{Hashable, Hasher};
pub use merkle::merkle_root;
pub use types::{Hash160, Hash256};
