use anyhow::Result;
use continuum_core::{PhysicalNode, RingConfig};
use continuum_ring::ConsistentHashRing;
use tracing::info;

use super::lookup::{KeyLookup, print_lookups};

const DEMO_KEYS: [&str; 5] = ["john", "alice", "peter", "stone", "steve"];

/// Four cache servers with the configured replica count, then two extra
/// replicas for cache0, then cache0 removed.
pub fn run(config: &RingConfig, json: bool) -> Result<()> {
    let servers: Vec<PhysicalNode> = (0..4)
        .map(|i| PhysicalNode::new(format!("cache{i}.server.com"), 12345))
        .collect();

    let mut ring =
        ConsistentHashRing::with_nodes(config.hash_function()?, &servers, config.replicas_per_node);
    ring.add_node(&servers[0], 2);

    info!(
        nodes = ring.node_count(),
        vnodes = ring.vnode_count(),
        "Ring built, {} has {} replicas",
        servers[0],
        ring.replicas(&servers[0]).len()
    );

    let lookups: Vec<KeyLookup> = DEMO_KEYS
        .iter()
        .map(|key| KeyLookup::resolve(&ring, key, 1))
        .collect();
    print_lookups(&lookups, json)?;

    let removed = ring.remove_node(&servers[0]);
    info!(node = %servers[0], removed, vnodes = ring.vnode_count(), "Removed node");

    let lookups: Vec<KeyLookup> = DEMO_KEYS
        .iter()
        .map(|key| KeyLookup::resolve(&ring, key, 1))
        .collect();
    print_lookups(&lookups, json)
}
