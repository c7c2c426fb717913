use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use continuum_core::{HashFunction, PhysicalNode};

use crate::ring::ConsistentHashRing;

/// Thread-safe handle to a ring.
///
/// Lookups share a read lock and run in parallel; adding or removing nodes
/// takes the write lock. Clones point at the same ring.
pub struct SharedRing<H = Box<dyn HashFunction>> {
    inner: Arc<RwLock<ConsistentHashRing<H>>>,
}

impl<H: HashFunction> SharedRing<H> {
    pub fn new(ring: ConsistentHashRing<H>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ring)),
        }
    }

    pub fn add_node(&self, node: &PhysicalNode, replicas: u32) {
        self.write().add_node(node, replicas);
    }

    pub fn remove_node(&self, node: &PhysicalNode) -> usize {
        self.write().remove_node(node)
    }

    pub fn get_node<K>(&self, key: &K) -> Option<PhysicalNode>
    where
        K: fmt::Display + ?Sized,
    {
        self.read().get_node(key).cloned()
    }

    pub fn get_nodes<K>(&self, key: &K, count: usize) -> Vec<PhysicalNode>
    where
        K: fmt::Display + ?Sized,
    {
        self.read()
            .get_nodes(key, count)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn contains_node(&self, node: &PhysicalNode) -> bool {
        self.read().contains_node(node)
    }

    pub fn node_count(&self) -> usize {
        self.read().node_count()
    }

    pub fn vnode_count(&self) -> usize {
        self.read().vnode_count()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Hold the read lock for a batch of lookups.
    pub fn read(&self) -> RwLockReadGuard<'_, ConsistentHashRing<H>> {
        // The ring is consistent between vnode inserts, so poisoning is ignored.
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ConsistentHashRing<H>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<H> Clone for SharedRing<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: HashFunction> From<ConsistentHashRing<H>> for SharedRing<H> {
    fn from(ring: ConsistentHashRing<H>) -> Self {
        Self::new(ring)
    }
}

impl<H: HashFunction> fmt::Debug for SharedRing<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.read(), f)
    }
}
