//! Merkle roots over ordered hash sequences.
//!
//! Leaves are padded on the right with zero hashes up to the next power of
//! two, then combined pairwise with [`Hasher::add_sha256`] until one hash is
//! left. Padding never duplicates the last leaf.
use tracing::instrument;

use crate::{
    errors::CipherError,
    hashing::{Hashable, Hasher},
    types::Hash256,
};

/// Smallest power of two that is `>= n`. Zero maps to one.
///
/// Returns `None` when that power of two does not fit in a `usize`.
pub fn next_power_of_two(n: usize) -> Option<usize> {
    n.max(1).checked_next_power_of_two()
}

/// Right-pads `leaves` with zero hashes to a power-of-two length.
pub(crate) fn pad_leaves(leaves: &[Hash256]) -> Result<Vec<Hash256>, CipherError> {
    let width = next_power_of_two(leaves.len()).ok_or(CipherError::TooManyLeaves(leaves.len()))?;
    let mut padded = leaves.to_vec();
    padded.resize(width, Hash256::zero());
    Ok(padded)
}

/// Combines neighbours of an even-length level into the level above it.
pub(crate) fn next_level(hasher: &Hasher, level: &[Hash256]) -> Vec<Hash256> {
    level
        .chunks_exact(2)
        .map(|pair| hasher.add_sha256(&pair[0], &pair[1]))
        .collect()
}

/// Computes the merkle root of `leaves`.
///
/// # Returns
///
/// * `Ok(Hash256)` the root. A single leaf is its own root.
/// * `Err(CipherError::EmptyMerkleLeaves)` if `leaves` is empty.
#[instrument(skip_all, fields(leaves = leaves.len()))]
pub fn merkle_root(hasher: &Hasher, leaves: &[Hash256]) -> Result<Hash256, CipherError> {
    if leaves.is_empty() {
        return Err(CipherError::EmptyMerkleLeaves);
    }

    let mut level = pad_leaves(leaves)?;
    tracing::trace!(padded = level.len(), "building merkle root");
    while level.len() > 1 {
        level = next_level(hasher, &level);
    }
    Ok(level[0])
}

/// Hashes every item and computes the merkle root of the results.
pub fn merkle_root_of<T: Hashable>(hasher: &Hasher, items: &[T]) -> Result<Hash256, CipherError> {
    let leaves: Vec<Hash256> = items.iter().map(|item| item.hash(hasher)).collect();
    merkle_root(hasher, &leaves)
}
