use md5::{Digest, Md5};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::RingError;

/// Maps a key to a position on the ring.
///
/// Implementations must be deterministic across processes and spread their
/// output evenly over the range they produce.
pub trait HashFunction: Send + Sync {
    fn hash(&self, key: &str) -> u64;

    fn name(&self) -> &'static str;
}

impl<H: HashFunction + ?Sized> HashFunction for Box<H> {
    fn hash(&self, key: &str) -> u64 {
        (**self).hash(key)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<H: HashFunction + ?Sized> HashFunction for Arc<H> {
    fn hash(&self, key: &str) -> u64 {
        (**self).hash(key)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// First four bytes of the MD5 digest, little-endian.
///
/// Positions never exceed `u32::MAX`, which keeps them identical to other
/// ketama-style rings built on the same digest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Hash;

impl HashFunction for Md5Hash {
    fn hash(&self, key: &str) -> u64 {
        let digest = Md5::digest(key.as_bytes());
        u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]) as u64
    }

    fn name(&self) -> &'static str {
        "md5"
    }
}

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fnv1aHash;

impl HashFunction for Fnv1aHash {
    fn hash(&self, key: &str) -> u64 {
        let mut hash = FNV_OFFSET_BASIS;
        for byte in key.as_bytes() {
            hash ^= *byte as u32;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        hash as u64
    }

    fn name(&self) -> &'static str {
        "fnv1a"
    }
}

/// 64-bit XXH3, for rings that want the full `u64` position space.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xxh3Hash;

impl HashFunction for Xxh3Hash {
    fn hash(&self, key: &str) -> u64 {
        xxhash_rust::xxh3::xxh3_64(key.as_bytes())
    }

    fn name(&self) -> &'static str {
        "xxh3"
    }
}

/// Built-in hash functions, selectable by name from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Fnv1a,
    Xxh3,
}

impl HashAlgorithm {
    pub fn build(self) -> Box<dyn HashFunction> {
        match self {
            HashAlgorithm::Md5 => Box::new(Md5Hash),
            HashAlgorithm::Fnv1a => Box::new(Fnv1aHash),
            HashAlgorithm::Xxh3 => Box::new(Xxh3Hash),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Fnv1a => "fnv1a",
            HashAlgorithm::Xxh3 => "xxh3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = RingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "fnv1a" | "fnv-1a" => Ok(HashAlgorithm::Fnv1a),
            "xxh3" => Ok(HashAlgorithm::Xxh3),
            _ => Err(RingError::UnavailableHashAlgorithm(s.to_string())),
        }
    }
}
