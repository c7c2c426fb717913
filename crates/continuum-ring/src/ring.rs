use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use continuum_core::{HashFunction, PhysicalNode, RingConfig, RingError, VirtualNode, metrics};
use tracing::{debug, warn};

use crate::continuum::Continuum;

/// Consistent hash ring for key-to-node mapping.
///
/// Each physical node occupies one or more virtual nodes, placed at
/// `hasher.hash("host:port:replica")`. A key belongs to the first virtual node
/// at or clockwise after `hasher.hash(key)`.
pub struct ConsistentHashRing<H = Box<dyn HashFunction>> {
    hasher: H,
    continuum: Continuum,
}

impl<H: HashFunction> ConsistentHashRing<H> {
    pub fn new(hasher: H) -> Self {
        Self {
            hasher,
            continuum: Continuum::new(),
        }
    }

    /// Build a ring with `replicas_per_node` virtual nodes for each of `nodes`.
    pub fn with_nodes<I>(hasher: H, nodes: I, replicas_per_node: u32) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<PhysicalNode>,
    {
        let mut ring = Self::new(hasher);
        for node in nodes {
            ring.add_node(node.borrow(), replicas_per_node);
        }
        ring
    }

    /// Add `replicas` more virtual nodes for `node`.
    ///
    /// Replica indices continue after the ones the node already has, so calling
    /// this twice with 2 leaves the node with replicas 0 through 3.
    pub fn add_node(&mut self, node: &PhysicalNode, replicas: u32) {
        if replicas == 0 {
            return;
        }

        let parent = self.continuum.parent_of(node);
        let first = self.continuum.next_replica(node);

        for replica in first..first.saturating_add(replicas) {
            let vnode = VirtualNode::new(Arc::clone(&parent), replica);
            let position = self.hasher.hash(&vnode.key());
            debug!(vnode = %vnode, position, "add vnode");

            if let Some(displaced) = self.continuum.insert(position, vnode) {
                warn!(
                    displaced = %displaced,
                    position,
                    "vnode position collision, earlier vnode overwritten"
                );
                metrics::record_position_collision();
            }
        }

        metrics::record_vnodes_added(replicas as u64);
        metrics::set_vnode_count(self.continuum.len() as f64);
    }

    /// Remove `node` and every one of its virtual nodes. Returns how many
    /// virtual nodes were taken off the ring.
    pub fn remove_node(&mut self, node: &PhysicalNode) -> usize {
        let mut removed = 0;
        for vnode in self.continuum.replicas(node) {
            let position = self.hasher.hash(&vnode.key());
            debug!(vnode = %vnode, position, "remove vnode");
            if self.continuum.remove(position, &vnode) {
                removed += 1;
            }
        }

        if removed > 0 {
            metrics::record_vnodes_removed(removed as u64);
            metrics::set_vnode_count(self.continuum.len() as f64);
        }
        removed
    }

    /// Physical node responsible for `key`, or `None` if the ring is empty.
    pub fn get_node<K>(&self, key: &K) -> Option<&PhysicalNode>
    where
        K: fmt::Display + ?Sized,
    {
        self.get_vnode(key).map(VirtualNode::parent)
    }

    /// Virtual node responsible for `key`.
    pub fn get_vnode<K>(&self, key: &K) -> Option<&VirtualNode>
    where
        K: fmt::Display + ?Sized,
    {
        if self.continuum.is_empty() {
            metrics::record_lookup(false);
            return None;
        }

        let position = self.position_of(key);
        let vnode = self.continuum.successor(position).map(|(_, vnode)| vnode);
        metrics::record_lookup(vnode.is_some());
        vnode
    }

    /// Up to `count` distinct physical nodes for `key`, walking clockwise.
    /// The first entry is always `get_node(key)`.
    pub fn get_nodes<K>(&self, key: &K, count: usize) -> Vec<&PhysicalNode>
    where
        K: fmt::Display + ?Sized,
    {
        let wanted = count.min(self.continuum.node_count());
        let mut owners: Vec<&PhysicalNode> = Vec::with_capacity(wanted);
        if wanted == 0 {
            return owners;
        }

        for (_, vnode) in self.continuum.walk(self.position_of(key)) {
            let parent = vnode.parent();
            if !owners.contains(&parent) {
                owners.push(parent);
                if owners.len() == wanted {
                    break;
                }
            }
        }
        owners
    }

    /// Ring position of `key` under this ring's hash function.
    pub fn position_of<K>(&self, key: &K) -> u64
    where
        K: fmt::Display + ?Sized,
    {
        self.hasher.hash(&key.to_string())
    }

    /// Virtual nodes of `node` currently on the ring, ordered by replica index.
    pub fn replicas(&self, node: &PhysicalNode) -> Vec<VirtualNode> {
        self.continuum.replicas(node)
    }

    pub fn contains_node(&self, node: &PhysicalNode) -> bool {
        self.continuum.contains_node(node)
    }

    pub fn nodes(&self) -> Vec<PhysicalNode> {
        self.continuum.nodes()
    }

    pub fn node_count(&self) -> usize {
        self.continuum.node_count()
    }

    pub fn vnode_count(&self) -> usize {
        self.continuum.len()
    }

    pub fn is_empty(&self) -> bool {
        self.continuum.is_empty()
    }

    pub fn hash_function(&self) -> &H {
        &self.hasher
    }

    pub fn continuum(&self) -> &Continuum {
        &self.continuum
    }
}

impl ConsistentHashRing<Box<dyn HashFunction>> {
    /// Build a ring from configuration. Fails if the configured hash algorithm
    /// is not available.
    pub fn from_config(config: &RingConfig) -> Result<Self, RingError> {
        let hasher = config.hash_function()?;
        Ok(Self::with_nodes(
            hasher,
            &config.nodes,
            config.replicas_per_node,
        ))
    }
}

impl<H: HashFunction> fmt::Debug for ConsistentHashRing<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsistentHashRing")
            .field("hash", &self.hasher.name())
            .field("nodes", &self.continuum.node_count())
            .field("vnodes", &self.continuum.len())
            .finish()
    }
}
