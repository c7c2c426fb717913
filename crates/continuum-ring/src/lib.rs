//! Consistent hash ring mapping keys onto a changing set of physical nodes.
//!
//! Each physical node is placed on the ring as several virtual nodes. Adding or
//! removing a node only moves the keys that land on its virtual nodes.

pub mod continuum;
pub mod ring;
pub mod shared;

pub use continuum::Continuum;
pub use ring::ConsistentHashRing;
pub use shared::SharedRing;
