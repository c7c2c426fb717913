use metrics::{counter, gauge};

pub fn record_vnodes_added(count: u64) {
    counter!("continuum_vnodes_added_total").increment(count);
}

pub fn record_vnodes_removed(count: u64) {
    counter!("continuum_vnodes_removed_total").increment(count);
}

pub fn record_position_collision() {
    counter!("continuum_position_collisions_total").increment(1);
}

pub fn record_lookup(hit: bool) {
    let result = if hit { "hit" } else { "empty" };
    counter!("continuum_lookups_total", "result" => result).increment(1);
}

pub fn set_vnode_count(count: f64) {
    gauge!("continuum_vnodes").set(count);
}
