//! Hash combinators backed by pooled engines.
//!
//! A [`Hasher`] owns one engine pool per algorithm. Build it once at startup
//! and pass it (or a clone, which shares the pools) to whatever needs to hash.

use crate::{
    config::HasherConfig,
    errors::CipherError,
    pool::{Ripemd160Pool, Sha256Pool},
    types::{Hash160, Hash256},
};

#[derive(Debug, Clone)]
pub struct Hasher {
    sha256: Sha256Pool,
    ripemd160: Ripemd160Pool,
}

impl Default for Hasher {
    fn default() -> Self {
        Hasher::new(HasherConfig::default()).expect("default pool sizes are non-zero")
    }
}

impl Hasher {
    /// Builds the engine pools described by `config`.
    pub fn new(config: HasherConfig) -> Result<Self, CipherError> {
        config.validate()?;
        Ok(Hasher {
            sha256: Sha256Pool::new(config.sha256_pool_size)?,
            ripemd160: Ripemd160Pool::new(config.ripemd160_pool_size)?,
        })
    }

    pub fn sha256_pool(&self) -> &Sha256Pool {
        &self.sha256
    }

    pub fn ripemd160_pool(&self) -> &Ripemd160Pool {
        &self.ripemd160
    }

    /// SHA-256 of `data`.
    pub fn sum_sha256(&self, data: impl AsRef<[u8]>) -> Hash256 {
        let sum = self.sha256.acquire().digest(data);
        Hash256::must_from_bytes(&sum)
    }

    /// Like [`Hasher::sum_sha256`], but `data` must be exactly `n` bytes long.
    ///
    /// # Panics
    ///
    /// Panics if the length differs.
    pub fn must_sum_sha256(&self, data: impl AsRef<[u8]>, n: usize) -> Hash256 {
        let data = data.as_ref();
        if data.len() != n {
            tracing::error!(expected = n, actual = data.len(), "invalid sum_sha256 input length");
            panic!("Invalid sum_sha256 byte length. Expected {n}, have {}", data.len());
        }
        self.sum_sha256(data)
    }

    /// SHA-256 applied twice.
    pub fn double_sha256(&self, data: impl AsRef<[u8]>) -> Hash256 {
        let first = self.sum_sha256(data);
        self.sum_sha256(first)
    }

    /// SHA-256 of `a` followed by `b`. Order matters.
    pub fn add_sha256(&self, a: &Hash256, b: &Hash256) -> Hash256 {
        let mut engine = self.sha256.acquire();
        sha2::Digest::update(&mut *engine, a);
        sha2::Digest::update(&mut *engine, b);
        Hash256::must_from_bytes(&engine.finalize())
    }

    /// RIPEMD-160 of `data`.
    pub fn hash_ripemd160(&self, data: impl AsRef<[u8]>) -> Hash160 {
        let sum = self.ripemd160.acquire().digest(data);
        Hash160::must_from_bytes(&sum)
    }
}

/// Something that can be reduced to a [`Hash256`].
pub trait Hashable {
    fn hash(&self, hasher: &Hasher) -> Hash256;
}

mod implementations {
    use super::{Hashable, Hasher};
    use crate::types::Hash256;

    impl Hashable for str {
        fn hash(&self, hasher: &Hasher) -> Hash256 {
            hasher.sum_sha256(self.as_bytes())
        }
    }

    impl Hashable for &str {
        fn hash(&self, hasher: &Hasher) -> Hash256 {
            hasher.sum_sha256(self.as_bytes())
        }
    }

    impl Hashable for String {
        fn hash(&self, hasher: &Hasher) -> Hash256 {
            hasher.sum_sha256(self.as_bytes())
        }
    }

    impl Hashable for [u8] {
        fn hash(&self, hasher: &Hasher) -> Hash256 {
            hasher.sum_sha256(self)
        }
    }

    impl Hashable for Vec<u8> {
        fn hash(&self, hasher: &Hasher) -> Hash256 {
            hasher.sum_sha256(self)
        }
    }

    impl Hashable for Hash256 {
        fn hash(&self, hasher: &Hasher) -> Hash256 {
            hasher.sum_sha256(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    // SHA-256("abc")
    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
    // SHA-256("")
    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    // RIPEMD-160("abc")
    const ABC_RIPEMD160: &str = "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc";
    // SHA-256(SHA-256("hello"))
    const HELLO_DOUBLE_SHA256: &str = "9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50";

    #[test]
    fn test_sum_sha256_known_vectors() {
        let hasher = Hasher::default();
        assert_eq!(hasher.sum_sha256(b"abc").to_hex(), ABC_SHA256);
        assert_eq!(hasher.sum_sha256(b"").to_hex(), EMPTY_SHA256);
        assert!(!hasher.sum_sha256(b"").is_null());
    }

    #[test]
    fn test_sum_sha256_deterministic() {
        let hasher = Hasher::default();
        let a = hasher.sum_sha256(b"block header");
        let b = hasher.sum_sha256(b"block header");
        assert_eq!(a, b);
        assert_ne!(a, hasher.sum_sha256(b"block headers"));
    }

    #[test]
    fn test_double_sha256() {
        let hasher = Hasher::default();
        let double = hasher.double_sha256(b"hello");
        assert_eq!(double.to_hex(), HELLO_DOUBLE_SHA256);
        assert_eq!(double, hasher.sum_sha256(hasher.sum_sha256(b"hello").as_bytes()));
    }

    #[test]
    fn test_add_sha256_is_hash_of_concatenation() {
        let hasher = Hasher::default();
        let a = hasher.sum_sha256(b"a");
        let b = hasher.sum_sha256(b"b");
        let mut concat = a.to_bytes().to_vec();
        concat.extend_from_slice(b.as_bytes());
        assert_eq!(concat.len(), 64);
        assert_eq!(hasher.add_sha256(&a, &b), hasher.sum_sha256(&concat));
        assert_ne!(hasher.add_sha256(&a, &b), hasher.add_sha256(&b, &a));
    }

    #[test]
    fn test_must_sum_sha256() {
        let hasher = Hasher::default();
        assert_eq!(hasher.must_sum_sha256(b"abc", 3).to_hex(), ABC_SHA256);
    }

    #[test]
    #[should_panic(expected = "Invalid sum_sha256 byte length")]
    fn test_must_sum_sha256_wrong_length() {
        Hasher::default().must_sum_sha256(b"abc", 4);
    }

    #[test]
    fn test_hash_ripemd160() {
        let hasher = Hasher::default();
        let hash = hasher.hash_ripemd160(b"abc");
        assert_eq!(hash.to_hex(), ABC_RIPEMD160);
        assert_eq!(hash, hasher.hash_ripemd160(b"abc"));
    }

    #[test]
    fn test_new_validates_config() {
        let bad = HasherConfig { sha256_pool_size: 0, ripemd160_pool_size: 1 };
        assert!(matches!(Hasher::new(bad), Err(CipherError::InvalidPoolSize(0))));

        let hasher = Hasher::new(HasherConfig { sha256_pool_size: 2, ripemd160_pool_size: 3 }).unwrap();
        assert_eq!(hasher.sha256_pool().capacity(), 2);
        assert_eq!(hasher.ripemd160_pool().capacity(), 3);
    }

    #[test]
    fn test_default_uses_default_config() {
        let hasher = Hasher::default();
        let config = HasherConfig::default();
        assert_eq!(hasher.sha256_pool().capacity(), config.sha256_pool_size);
        assert_eq!(hasher.ripemd160_pool().capacity(), config.ripemd160_pool_size);
    }

    #[test]
    fn test_engines_returned_after_use() {
        let hasher = Hasher::new(HasherConfig { sha256_pool_size: 1, ripemd160_pool_size: 1 }).unwrap();
        let a = hasher.sum_sha256(b"x");
        hasher.add_sha256(&a, &a);
        hasher.double_sha256(b"y");
        hasher.hash_ripemd160(b"z");
        assert_eq!(hasher.sha256_pool().available(), 1);
        assert_eq!(hasher.ripemd160_pool().available(), 1);
    }

    #[test]
    fn test_hashable_impls_agree() {
        let hasher = Hasher::default();
        let expected = hasher.sum_sha256(b"pillar");
        assert_eq!("pillar".hash(&hasher), expected);
        assert_eq!(String::from("pillar").hash(&hasher), expected);
        assert_eq!(b"pillar".to_vec().hash(&hasher), expected);
        assert_eq!(b"pillar"[..].hash(&hasher), expected);
        assert_eq!(expected.hash(&hasher), hasher.sum_sha256(expected.as_bytes()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_sums_match() {
        // fewer engines than tasks so callers contend for the pool
        let hasher = Arc::new(Hasher::new(HasherConfig { sha256_pool_size: 3, ripemd160_pool_size: 2 }).unwrap());
        let expected: Vec<Hash256> = (0..64u32)
            .map(|i| hasher.sum_sha256(i.to_le_bytes()))
            .collect();

        let mut handles = Vec::new();
        for round in 0..4 {
            for i in 0..64u32 {
                let hasher = hasher.clone();
                handles.push(tokio::task::spawn_blocking(move || {
                    let sum = hasher.sum_sha256(i.to_le_bytes());
                    let _ = hasher.hash_ripemd160(i.to_le_bytes());
                    (round, i, sum)
                }));
            }
        }
        for handle in handles {
            let (_, i, sum) = handle.await.unwrap();
            assert_eq!(sum, expected[i as usize]);
        }
        assert_eq!(hasher.sha256_pool().available(), 3);
        assert_eq!(hasher.ripemd160_pool().available(), 2);
    }
}
