//! Fixed-size hash values.
//!
//! A `FixedHash<N>` always holds exactly `N` bytes. Values are built by
//! validated construction and are `Copy`, so consumers never mutate a hash in
//! place.
use std::{fmt, str::FromStr};

use crate::errors::CipherError;

/// Output length of SHA-256 in bytes.
pub const SHA256_LENGTH: usize = 32;
/// Output length of RIPEMD-160 in bytes.
pub const RIPEMD160_LENGTH: usize = 20;

/// A hash of exactly `N` bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedHash<const N: usize>([u8; N]);

/// 32-byte SHA-256 digest.
pub type Hash256 = FixedHash<SHA256_LENGTH>;
/// 20-byte RIPEMD-160 digest.
pub type Hash160 = FixedHash<RIPEMD160_LENGTH>;

impl<const N: usize> FixedHash<N> {
    /// Number of bytes in this hash type.
    pub const LENGTH: usize = N;

    /// The all-zero hash, also used as merkle padding.
    pub const fn zero() -> Self {
        FixedHash([0u8; N])
    }

    pub const fn new(bytes: [u8; N]) -> Self {
        FixedHash(bytes)
    }

    /// Copies `bytes` into a new hash.
    ///
    /// # Returns
    ///
    /// * `Ok(FixedHash)` if `bytes` is exactly `N` long.
    /// * `Err(CipherError::InvalidLength)` otherwise. Input is never truncated or padded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CipherError> {
        let array: [u8; N] = bytes.try_into().map_err(|_| CipherError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        })?;
        Ok(FixedHash(array))
    }

    /// Same as [`FixedHash::from_bytes`] for buffers already known to be `N`
    /// bytes long, such as digest output.
    ///
    /// # Panics
    ///
    /// Panics if the length is wrong. That is a logic error in the caller, not bad input.
    pub fn must_from_bytes(bytes: &[u8]) -> Self {
        match Self::from_bytes(bytes) {
            Ok(hash) => hash,
            Err(err) => {
                tracing::error!("{err}");
                panic!("{err}");
            }
        }
    }

    /// Decodes a hex string, upper or lower case.
    ///
    /// # Returns
    ///
    /// * `Err(CipherError::InvalidHexEncoding)` if `text` is not hex.
    /// * `Err(CipherError::InvalidHexLength)` if it decodes to anything but `N` bytes.
    pub fn from_hex(text: &str) -> Result<Self, CipherError> {
        let bytes = hex::decode(text)?;
        if bytes.len() != N {
            return Err(CipherError::InvalidHexLength {
                expected: N,
                actual: bytes.len(),
            });
        }
        Ok(Self::must_from_bytes(&bytes))
    }

    /// Same as [`FixedHash::from_hex`] but panics on invalid input.
    pub fn must_from_hex(text: &str) -> Self {
        match Self::from_hex(text) {
            Ok(hash) => hash,
            Err(err) => {
                tracing::error!("{err}");
                panic!("{err}");
            }
        }
    }

    /// Lower-case hex, always `2 * N` characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// True iff every byte is zero.
    pub fn is_null(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Byte-wise XOR. Commutative and its own inverse.
    pub fn xor(&self, other: &Self) -> Self {
        let mut out = [0u8; N];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = self.0[i] ^ other.0[i];
        }
        FixedHash(out)
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; N] {
        self.0
    }
}

impl<const N: usize> Default for FixedHash<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> From<[u8; N]> for FixedHash<N> {
    fn from(bytes: [u8; N]) -> Self {
        FixedHash(bytes)
    }
}

impl<const N: usize> From<FixedHash<N>> for [u8; N] {
    fn from(hash: FixedHash<N>) -> Self {
        hash.0
    }
}

impl<const N: usize> TryFrom<&[u8]> for FixedHash<N> {
    type Error = CipherError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl<const N: usize> AsRef<[u8]> for FixedHash<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> FromStr for FixedHash<N> {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl<const N: usize> fmt::Display for FixedHash<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl<const N: usize> fmt::Debug for FixedHash<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash{}({})", N * 8, self.to_hex())
    }
}
