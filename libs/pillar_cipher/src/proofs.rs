use serde::{Deserialize, Serialize};

use crate::{
    errors::CipherError,
    hashing::Hasher,
    merkle::{next_level, next_power_of_two, pad_leaves},
    types::Hash256,
};

/// Side of the running hash that a proof sibling sits on.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Hash, PartialEq, Eq)]
pub enum HashDirection {
    Left,
    Right,
}

/// Sibling path from one leaf to the root of the zero-padded tree.
///
/// The leaf position and leaf count are part of the proof: they fix how many
/// siblings there are and which side each one sits on.
#[derive(Debug, Clone, Deserialize, Serialize, Hash, PartialEq, Eq)]
pub struct MerkleProof {
    pub leaf_index: usize,
    pub leaf_count: usize,
    pub hashes: Vec<Hash256>,
    pub root: Hash256,
}

impl MerkleProof {
    /// Side of each sibling, leaf level first, read from the bits of `leaf_index`.
    pub fn directions(&self) -> impl Iterator<Item = HashDirection> + '_ {
        (0..self.hashes.len()).map(move |level| {
            if self.leaf_index.checked_shr(level as u32).unwrap_or(0) & 1 == 0 {
                HashDirection::Right
            } else {
                HashDirection::Left
            }
        })
    }
}

/// Generate a proof that `leaves[index]` is part of the merkle root of `leaves`.
pub fn generate_proof_of_inclusion(
    hasher: &Hasher,
    leaves: &[Hash256],
    index: usize,
) -> Result<MerkleProof, CipherError> {
    if leaves.is_empty() {
        return Err(CipherError::EmptyMerkleLeaves);
    }
    if index >= leaves.len() {
        return Err(CipherError::LeafIndexOutOfRange { index, len: leaves.len() });
    }

    let mut level = pad_leaves(leaves)?;
    let mut position = index;
    let mut hashes = Vec::new();

    while level.len() > 1 {
        hashes.push(level[position ^ 1]);
        level = next_level(hasher, &level);
        position /= 2;
    }

    Ok(MerkleProof {
        leaf_index: index,
        leaf_count: leaves.len(),
        hashes,
        root: level[0],
    })
}

/// Verify a merkle proof for `leaf` against `root`.
///
/// Fails when the proof was built for another root, names a position outside
/// the supplied leaves, or has the wrong number of siblings for its leaf
/// count. Callers that know the real leaf count should also compare it with
/// `proof.leaf_count`.
pub fn verify_proof_of_inclusion(hasher: &Hasher, leaf: &Hash256, proof: &MerkleProof, root: &Hash256) -> bool {
    if proof.root != *root || proof.leaf_index >= proof.leaf_count {
        return false;
    }
    let Some(width) = next_power_of_two(proof.leaf_count) else {
        return false;
    };
    if proof.hashes.len() != width.trailing_zeros() as usize {
        return false;
    }

    let mut current = *leaf;
    for (hash, direction) in proof.hashes.iter().zip(proof.directions()) {
        current = match direction {
            HashDirection::Left => hasher.add_sha256(hash, &current),
            HashDirection::Right => hasher.add_sha256(&current, hash),
        };
    }

    current == *root
}
