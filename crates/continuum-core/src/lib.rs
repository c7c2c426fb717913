pub mod config;
pub mod error;
pub mod hash;
pub mod metrics;
pub mod types;

pub use config::*;
pub use error::RingError;
pub use hash::{Fnv1aHash, HashAlgorithm, HashFunction, Md5Hash, Xxh3Hash};
pub use types::*;
