use std::{fmt::Display, time::Duration};

#[derive(Debug)]
pub enum CipherError {
    /// The byte buffer does not have the exact length of the target hash
    InvalidLength { expected: usize, actual: usize },
    /// The input string is not valid hexadecimal
    InvalidHexEncoding(hex::FromHexError),
    /// The input is valid hex but decodes to the wrong number of bytes
    InvalidHexLength { expected: usize, actual: usize },
    /// A pool cannot be built without any engines
    InvalidPoolSize(usize),
    /// No engine was released within the allowed wait
    PoolTimeout(Duration),
    /// A merkle root needs at least one leaf
    EmptyMerkleLeaves,
    /// The padded tree width does not fit in a usize
    TooManyLeaves(usize),
    /// The requested leaf does not exist
    LeafIndexOutOfRange { index: usize, len: usize },
}

impl Display for CipherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CipherError::InvalidLength { expected, actual } => {
                write!(f, "Invalid hash length: expected {expected} bytes, got {actual}")
            }
            CipherError::InvalidHexEncoding(err) => {
                write!(f, "Invalid hex encoding: {err}")
            }
            CipherError::InvalidHexLength { expected, actual } => {
                write!(f, "Invalid hex length: expected {expected} bytes, decoded {actual}")
            }
            CipherError::InvalidPoolSize(size) => {
                write!(f, "Invalid engine pool size: {size}")
            }
            CipherError::PoolTimeout(wait) => {
                write!(f, "No hash engine available after {wait:?}")
            }
            CipherError::EmptyMerkleLeaves => {
                write!(f, "Cannot compute a merkle root without leaves")
            }
            CipherError::TooManyLeaves(len) => {
                write!(f, "Too many merkle leaves to pad: {len}")
            }
            CipherError::LeafIndexOutOfRange { index, len } => {
                write!(f, "Leaf index {index} out of range for {len} leaves")
            }
        }
    }
}

impl std::error::Error for CipherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CipherError::InvalidHexEncoding(err) => Some(err),
            _ => None,
        }
    }
}

impl From<hex::FromHexError> for CipherError {
    fn from(err: hex::FromHexError) -> Self {
        CipherError::InvalidHexEncoding(err)
    }
}
