use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::RingError;

/// A real node the ring can route to, identified by `host:port`.
///
/// Fields are private so a node cannot change identity after it has been
/// placed on a ring. Moving a node means removing it and adding the new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhysicalNode {
    host: String,
    port: u16,
}

impl PhysicalNode {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Identity key, `host:port`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PhysicalNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

// Ordered by identity key, so "a:80" < "a:9" < "b:1".
impl Ord for PhysicalNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for PhysicalNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for PhysicalNode {
    type Err = RingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| RingError::InvalidNode(s.to_string()))?;
        if host.is_empty() {
            return Err(RingError::InvalidNode(s.to_string()));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| RingError::InvalidNode(s.to_string()))?;
        Ok(Self::new(host, port))
    }
}

/// One replica of a physical node on the ring.
///
/// The parent is shared with every other replica of the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VirtualNode {
    parent: Arc<PhysicalNode>,
    replica: u32,
}

impl VirtualNode {
    pub fn new(parent: Arc<PhysicalNode>, replica: u32) -> Self {
        Self { parent, replica }
    }

    pub fn parent(&self) -> &PhysicalNode {
        &self.parent
    }

    pub fn replica(&self) -> u32 {
        self.replica
    }

    pub fn replica_of(&self, node: &PhysicalNode) -> bool {
        *self.parent == *node
    }

    /// Identity key, `host:port:replica`. This is what gets hashed onto the ring.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.parent, self.replica)
    }
}
