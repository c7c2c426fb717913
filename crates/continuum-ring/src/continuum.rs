//! Ordered position space backing the ring.
//!
//! `Continuum` knows nothing about hashing. It stores virtual nodes by
//! position, answers clockwise successor queries with wraparound, and keeps
//! a per-node index of which replicas are currently on the ring so that
//! replica counting does not need a full scan.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use continuum_core::{PhysicalNode, VirtualNode};

#[derive(Debug, Clone, Default)]
pub struct Continuum {
    /// Ring position -> virtual node.
    points: BTreeMap<u64, VirtualNode>,
    /// Replica indices currently on the ring, per physical node.
    members: HashMap<Arc<PhysicalNode>, BTreeSet<u32>>,
}

impl Continuum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `vnode` at `position`.
    ///
    /// Returns the virtual node that previously held the position, if it was a
    /// different one. The displaced replica is no longer on the ring.
    pub fn insert(&mut self, position: u64, vnode: VirtualNode) -> Option<VirtualNode> {
        let parent = self.parent_of(vnode.parent());
        self.members
            .entry(parent)
            .or_default()
            .insert(vnode.replica());

        let displaced = self.points.insert(position, vnode)?;
        if self.points.get(&position) == Some(&displaced) {
            return None;
        }
        self.forget(&displaced);
        Some(displaced)
    }

    /// Remove `vnode` from `position`. Does nothing if another virtual node
    /// holds that position.
    pub fn remove(&mut self, position: u64, vnode: &VirtualNode) -> bool {
        if self.points.get(&position) != Some(vnode) {
            return false;
        }
        self.points.remove(&position);
        self.forget(vnode);
        true
    }

    /// First entry at or after `position`, wrapping to the lowest position.
    pub fn successor(&self, position: u64) -> Option<(u64, &VirtualNode)> {
        self.points
            .range(position..)
            .next()
            .or_else(|| self.points.iter().next())
            .map(|(pos, vnode)| (*pos, vnode))
    }

    /// Every entry, clockwise from `position`, visiting each exactly once.
    pub fn walk(&self, position: u64) -> impl Iterator<Item = (u64, &VirtualNode)> {
        self.points
            .range(position..)
            .chain(self.points.range(..position))
            .map(|(pos, vnode)| (*pos, vnode))
    }

    /// All entries in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &VirtualNode)> {
        self.points.iter().map(|(pos, vnode)| (*pos, vnode))
    }

    /// The shared handle for `node`, reusing the one already on the ring.
    pub fn parent_of(&self, node: &PhysicalNode) -> Arc<PhysicalNode> {
        self.members
            .get_key_value(node)
            .map(|(parent, _)| Arc::clone(parent))
            .unwrap_or_else(|| Arc::new(node.clone()))
    }

    /// Replicas of `node` currently on the ring, ordered by replica index.
    pub fn replicas(&self, node: &PhysicalNode) -> Vec<VirtualNode> {
        match self.members.get_key_value(node) {
            Some((parent, indices)) => indices
                .iter()
                .map(|replica| VirtualNode::new(Arc::clone(parent), *replica))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn replica_count(&self, node: &PhysicalNode) -> usize {
        self.members.get(node).map_or(0, BTreeSet::len)
    }

    /// Next unused replica index for `node`. Indices are never handed out twice
    /// while the node stays on the ring.
    pub fn next_replica(&self, node: &PhysicalNode) -> u32 {
        self.members
            .get(node)
            .and_then(|indices| indices.last())
            .map_or(0, |last| last + 1)
    }

    pub fn contains_node(&self, node: &PhysicalNode) -> bool {
        self.members.contains_key(node)
    }

    /// Distinct physical nodes, sorted by identity key.
    pub fn nodes(&self) -> Vec<PhysicalNode> {
        let mut nodes: Vec<PhysicalNode> = self
            .members
            .keys()
            .map(|parent| (**parent).clone())
            .collect();
        nodes.sort();
        nodes
    }

    pub fn node_count(&self) -> usize {
        self.members.len()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn forget(&mut self, vnode: &VirtualNode) {
        if let Some(indices) = self.members.get_mut(vnode.parent()) {
            indices.remove(&vnode.replica());
            if indices.is_empty() {
                self.members.remove(vnode.parent());
            }
        }
    }
}
