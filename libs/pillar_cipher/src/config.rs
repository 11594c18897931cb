use serde::{Deserialize, Serialize};

use crate::errors::CipherError;

/// Default number of engines kept per algorithm.
pub const DEFAULT_POOL_SIZE: usize = 30;

/// Sizes of the engine pools owned by a [`crate::hashing::Hasher`].
///
/// Capacities are fixed once the hasher is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HasherConfig {
    pub sha256_pool_size: usize,
    pub ripemd160_pool_size: usize,
}

impl Default for HasherConfig {
    fn default() -> Self {
        HasherConfig {
            sha256_pool_size: DEFAULT_POOL_SIZE,
            ripemd160_pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl HasherConfig {
    /// Rejects empty pools, which would block every caller forever.
    pub fn validate(&self) -> Result<(), CipherError> {
        for size in [self.sha256_pool_size, self.ripemd160_pool_size] {
            if size == 0 {
                return Err(CipherError::InvalidPoolSize(size));
            }
        }
        Ok(())
    }
}
