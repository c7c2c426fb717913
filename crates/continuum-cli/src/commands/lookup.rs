use anyhow::Result;
use continuum_core::{HashFunction, RingConfig};
use continuum_ring::ConsistentHashRing;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct KeyLookup {
    pub key: String,
    pub position: u64,
    pub nodes: Vec<String>,
    pub vnode: Option<String>,
}

impl KeyLookup {
    pub fn resolve<H: HashFunction>(ring: &ConsistentHashRing<H>, key: &str, count: usize) -> Self {
        Self {
            key: key.to_string(),
            position: ring.position_of(key),
            nodes: ring
                .get_nodes(key, count)
                .into_iter()
                .map(|node| node.key())
                .collect(),
            vnode: ring.get_vnode(key).map(|vnode| vnode.key()),
        }
    }
}

pub fn print_lookups(lookups: &[KeyLookup], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(lookups)?);
        return Ok(());
    }

    for lookup in lookups {
        let nodes = if lookup.nodes.is_empty() {
            "(none)".to_string()
        } else {
            lookup.nodes.join(", ")
        };
        println!("key: {:<12} -> node: {nodes}", lookup.key);
    }
    Ok(())
}

pub fn run(config: &RingConfig, keys: &[String], count: usize, json: bool) -> Result<()> {
    let ring = ConsistentHashRing::from_config(config)?;
    if ring.is_empty() {
        eprintln!("Ring has no nodes; configure nodes or pass --node host:port");
    }

    let lookups: Vec<KeyLookup> = keys
        .iter()
        .map(|key| KeyLookup::resolve(&ring, key, count))
        .collect();
    print_lookups(&lookups, json)
}

#[derive(Debug, Serialize)]
struct NodeLayout {
    node: String,
    replicas: Vec<VnodeLayout>,
}

#[derive(Debug, Serialize)]
struct VnodeLayout {
    replica: u32,
    position: u64,
}

pub fn nodes(config: &RingConfig, json: bool) -> Result<()> {
    let ring = ConsistentHashRing::from_config(config)?;

    let layout: Vec<NodeLayout> = ring
        .nodes()
        .iter()
        .map(|node| NodeLayout {
            node: node.key(),
            replicas: ring
                .replicas(node)
                .iter()
                .map(|vnode| VnodeLayout {
                    replica: vnode.replica(),
                    position: ring.position_of(vnode),
                })
                .collect(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    println!(
        "{} nodes, {} vnodes, hash {}",
        ring.node_count(),
        ring.vnode_count(),
        ring.hash_function().name()
    );
    for entry in &layout {
        println!("{}", entry.node);
        for vnode in &entry.replicas {
            println!("  #{:<4} {:>20}", vnode.replica, vnode.position);
        }
    }
    Ok(())
}
