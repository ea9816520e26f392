//! Binary space partitioning tree over a fixed rectangle.
//!
//! The tree is built to its full depth up front and never changes shape.
//! Split direction alternates with the remaining depth: even levels split on
//! the x midpoint, odd levels on the y midpoint. Only leaves hold entries, and
//! every node tracks how many entries live in its subtree so searches can skip
//! empty branches.
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`], which is
//! also what `insert` hands back so callers can start the next operation from
//! the entity's last leaf instead of the root.

mod config;
mod construct;
mod query_closest;
mod types;
mod update_entities;

pub use config::Config;
pub use types::NodeId;

use types::Node;

/// Spatial index over point entities identified by `K`.
///
/// The index does not own entity data. Each leaf entry is the entity id plus
/// the position it was inserted at, so callers must remove an entity before
/// moving it and re-insert it afterwards (or use
/// [`LeafCache`](crate::LeafCache), which does that bookkeeping).
#[derive(Clone, Debug)]
pub struct SpatialIndex<K> {
    nodes: Vec<Node<K>>,
    depth: u32,
}
