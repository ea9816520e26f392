use crate::tree::{NodeId, SpatialIndex};
use common::Vector;
use fxhash::FxHashMap;
use std::hash::Hash;

/// Caller-side table of the leaf each entity was last stored in.
///
/// Purely a shortcut: every operation starts from the cached leaf instead of
/// the root, and falls back to the root for ids it has never seen.
#[derive(Debug, Clone)]
pub struct LeafCache<K> {
    leaves: FxHashMap<K, NodeId>,
}

impl<K: Copy + Eq + Hash> LeafCache<K> {
    pub fn new() -> Self {
        Self {
            leaves: FxHashMap::default(),
        }
    }

    pub fn leaf(&self, id: K) -> Option<NodeId> {
        self.leaves.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    fn start(&self, id: K) -> NodeId {
        self.leaf(id).unwrap_or(NodeId::ROOT)
    }

    /// Inserts `id` and remembers its leaf. Returns `None`, and forgets the
    /// id, when `position` is outside the index. An id that is already
    /// cached is moved instead of stored twice.
    pub fn insert(
        &mut self,
        index: &mut SpatialIndex<K>,
        id: K,
        position: Vector,
    ) -> Option<NodeId> {
        self.relocate(index, id, position)
    }

    pub fn remove(&mut self, index: &mut SpatialIndex<K>, id: K, position: Vector) -> bool {
        match self.leaves.remove(&id) {
            Some(leaf) => index.remove_at(leaf, id) || index.remove_from(leaf, id, position),
            None => index.remove(id, position),
        }
    }

    /// Moves `id` to `position`.
    ///
    /// The old entry is dropped by identity from the cached leaf, so this is
    /// safe to call after the entity has already moved. The new insert starts
    /// at that same leaf.
    pub fn relocate(
        &mut self,
        index: &mut SpatialIndex<K>,
        id: K,
        position: Vector,
    ) -> Option<NodeId> {
        let start = self.start(id);
        if let Some(leaf) = self.leaf(id) {
            index.remove_at(leaf, id);
        }
        let leaf = index.insert_from(start, id, position);
        self.store(id, leaf);
        leaf
    }

    pub fn closest(
        &self,
        index: &SpatialIndex<K>,
        id: K,
        position: Vector,
        max_distance: f32,
    ) -> Option<(f32, K)> {
        index.closest_from(self.start(id), id, position, max_distance)
    }

    pub fn closest_or_none(
        &self,
        index: &SpatialIndex<K>,
        id: K,
        position: Vector,
        max_distance: f32,
    ) -> Option<K> {
        index.closest_from_or_none(self.start(id), id, position, max_distance)
    }

    /// Drops the cached leaf for `id` without touching the index.
    pub fn forget(&mut self, id: K) -> Option<NodeId> {
        self.leaves.remove(&id)
    }

    pub fn clear(&mut self) {
        self.leaves.clear();
    }

    fn store(&mut self, id: K, leaf: Option<NodeId>) {
        match leaf {
            Some(leaf) => {
                self.leaves.insert(id, leaf);
            }
            None => {
                self.leaves.remove(&id);
            }
        }
    }
}

impl<K: Copy + Eq + Hash> Default for LeafCache<K> {
    fn default() -> Self {
        Self::new()
    }
}
