//! Serde support for fixed hashes.
//!
//! Human-readable formats get the lower-case hex string, binary formats get
//! the raw bytes. Decoding goes through the same validated constructors as
//! everything else.
use std::fmt;

use serde::{
    de::{self, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::types::FixedHash;

impl<const N: usize> Serialize for FixedHash<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(self.as_bytes())
        }
    }
}

struct FixedHashVisitor<const N: usize>;

impl<'de, const N: usize> Visitor<'de> for FixedHashVisitor<N> {
    type Value = FixedHash<N>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{N} bytes or {} hex characters", N * 2)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        FixedHash::from_hex(v).map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        FixedHash::from_bytes(v).map_err(E::custom)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut bytes = [0u8; N];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = seq
                .next_element()?
                .ok_or_else(|| <A::Error as de::Error>::invalid_length(i, &self))?;
        }
        // stop at the first extra element instead of draining the sequence
        if seq.next_element::<u8>()?.is_some() {
            return Err(<A::Error as de::Error>::invalid_length(N + 1, &self));
        }
        Ok(FixedHash::new(bytes))
    }
}

impl<'de, const N: usize> Deserialize<'de> for FixedHash<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(FixedHashVisitor::<N>)
        } else {
            deserializer.deserialize_bytes(FixedHashVisitor::<N>)
        }
    }
}
