use super::types::{LeafEntry, NodeId};
use super::SpatialIndex;
use common::{Spatial, Vector};
use log::{debug, trace};

impl<K: Copy + Eq> SpatialIndex<K> {
    pub fn insert(&mut self, id: K, position: Vector) -> Option<NodeId> {
        self.insert_from(NodeId::ROOT, id, position)
    }

    /// Inserts starting at `start`, usually the leaf the entity was last
    /// stored in.
    ///
    /// Walks up until a node contains `position` and routes down to the
    /// leaf from there. Every count from the leaf up to the root goes up by
    /// one. Returns the leaf, or `None` when not even the root contains the
    /// point.
    ///
    /// Each id must be stored at most once; remove before re-inserting.
    pub fn insert_from(&mut self, start: NodeId, id: K, position: Vector) -> Option<NodeId> {
        let Some(top) = self.containing_ancestor(start, position) else {
            trace!("insert outside indexed region at {:?}", position);
            return None;
        };
        let leaf = self.descend(top, position);
        self.nodes[leaf.index()]
            .entities
            .push(LeafEntry { id, position });
        self.increase_upwards(leaf);
        Some(leaf)
    }

    pub fn insert_entity<E: Spatial<Id = K>>(&mut self, entity: &E) -> Option<NodeId> {
        self.insert_from(NodeId::ROOT, entity.id(), entity.position())
    }

    pub fn insert_entity_from<E: Spatial<Id = K>>(
        &mut self,
        start: NodeId,
        entity: &E,
    ) -> Option<NodeId> {
        self.insert_from(start, entity.id(), entity.position())
    }

    pub fn remove(&mut self, id: K, position: Vector) -> bool {
        self.remove_from(NodeId::ROOT, id, position)
    }

    /// Removes `id`, locating its leaf by `position` the same way insert
    /// does. `position` must be the one the entity was inserted with.
    ///
    /// Returns `false` without touching anything when the point is outside
    /// the root or the leaf does not hold `id`.
    pub fn remove_from(&mut self, start: NodeId, id: K, position: Vector) -> bool {
        let Some(top) = self.containing_ancestor(start, position) else {
            return false;
        };
        let leaf = self.descend(top, position);
        self.remove_at(leaf, id)
    }

    pub fn remove_entity<E: Spatial<Id = K>>(&mut self, entity: &E) -> bool {
        self.remove_from(NodeId::ROOT, entity.id(), entity.position())
    }

    pub fn remove_entity_from<E: Spatial<Id = K>>(&mut self, start: NodeId, entity: &E) -> bool {
        self.remove_from(start, entity.id(), entity.position())
    }

    /// Removes `id` from `node` by identity alone, whatever position the
    /// entity has now.
    pub fn remove_at(&mut self, node: NodeId, id: K) -> bool {
        let entities = &mut self.nodes[node.index()].entities;
        let Some(index) = entities.iter().position(|entry| entry.id == id) else {
            return false;
        };
        entities.remove(index);
        self.reduce_upwards(node);
        true
    }

    fn increase_upwards(&mut self, node: NodeId) {
        let mut current = Some(node);
        while let Some(node_id) = current {
            let node = &mut self.nodes[node_id.index()];
            node.descendant_count += 1;
            current = node.parent;
        }
    }

    fn reduce_upwards(&mut self, node: NodeId) {
        let mut current = Some(node);
        while let Some(node_id) = current {
            let node = &mut self.nodes[node_id.index()];
            debug_assert!(node.descendant_count > 0);
            node.descendant_count -= 1;
            current = node.parent;
        }
    }

    /// Empties every leaf and zeroes every count.
    pub fn clear(&mut self) {
        let removed = self.len();
        for node in &mut self.nodes {
            node.entities.clear();
            node.descendant_count = 0;
        }
        debug!("cleared spatial index ({} entries dropped)", removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> SpatialIndex<u32> {
        SpatialIndex::new(3, Vector::new(0.0, 0.0), Vector::new(8.0, 8.0)).unwrap()
    }

    fn assert_counts_consistent(tree: &SpatialIndex<u32>) {
        for node in &tree.nodes {
            match node.split {
                Some(split) => assert_eq!(
                    node.descendant_count,
                    tree.descendant_count(split.children[0])
                        + tree.descendant_count(split.children[1])
                ),
                None => assert_eq!(node.descendant_count, node.entities.len()),
            }
        }
    }

    #[test]
    fn insert_from_leaf_walks_up_to_sibling() {
        let mut tree = tree();
        let left = tree.insert(1, Vector::new(1.0, 1.0)).unwrap();
        let right = tree.insert_from(left, 2, Vector::new(7.0, 7.0)).unwrap();
        assert_ne!(left, right);
        assert_eq!(tree.entities(right).collect::<Vec<_>>(), vec![2]);
        assert_eq!(tree.descendant_count(left), 1);
        assert_eq!(tree.len(), 2);
        assert_counts_consistent(&tree);
    }

    #[test]
    fn insert_from_leaf_staying_in_leaf_counts_every_ancestor() {
        let mut tree = tree();
        let leaf = tree.insert(1, Vector::new(1.0, 1.0)).unwrap();
        assert_eq!(tree.insert_from(leaf, 2, Vector::new(1.5, 1.5)), Some(leaf));
        assert_eq!(tree.descendant_count(leaf), 2);
        assert_eq!(tree.len(), 2);
        assert_counts_consistent(&tree);
    }

    #[test]
    fn insert_from_leaf_stopping_at_intermediate_ancestor() {
        let mut tree = tree();
        // Leaves are 4 wide and 2 tall; (1, 3) shares the depth-1 parent of
        // (1, 1) but not its leaf.
        let leaf = tree.insert(1, Vector::new(1.0, 1.0)).unwrap();
        let parent = tree.parent(leaf).unwrap();
        let other = tree.insert_from(leaf, 2, Vector::new(1.0, 3.0)).unwrap();
        assert_ne!(other, leaf);
        assert_eq!(tree.parent(other), Some(parent));
        assert_eq!(tree.descendant_count(parent), 2);
        assert_eq!(tree.len(), 2);
        assert_counts_consistent(&tree);
    }

    #[test]
    fn closest_after_cached_inserts_and_removal() {
        let mut tree = tree();
        let leaf = tree.insert(1, Vector::new(1.0, 1.0)).unwrap();
        tree.insert_from(leaf, 2, Vector::new(1.5, 1.5)).unwrap();
        tree.insert(3, Vector::new(7.0, 7.0)).unwrap();
        assert!(tree.remove_at(leaf, 1));
        assert_counts_consistent(&tree);
        assert_eq!(tree.len(), 2);

        let (distance, id) = tree
            .closest_to_point(Vector::new(1.0, 1.0), f32::INFINITY)
            .unwrap();
        assert_eq!(id, 2);
        assert_eq!(distance, Vector::new(1.0, 1.0).distance(Vector::new(1.5, 1.5)));
    }

    #[test]
    fn repeated_relocation_in_one_leaf_keeps_root_count() {
        let mut tree = tree();
        let mut leaf = tree.insert(1, Vector::new(1.0, 1.0)).unwrap();
        tree.insert(2, Vector::new(6.0, 6.0)).unwrap();
        for step in 0..20 {
            assert!(tree.remove_at(leaf, 1));
            let position = Vector::new(1.0 + step as f32 * 0.1, 1.0);
            leaf = tree.insert_from(leaf, 1, position).unwrap();
            assert_eq!(tree.len(), 2);
        }
        assert_counts_consistent(&tree);
    }

    #[test]
    fn remove_at_internal_node_is_noop() {
        let mut tree = tree();
        tree.insert(1, Vector::new(1.0, 1.0)).unwrap();
        assert!(!tree.remove_at(NodeId::ROOT, 1));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn remove_keeps_order_of_remaining_entries() {
        let mut tree = tree();
        let leaf = tree.insert(1, Vector::new(1.0, 1.0)).unwrap();
        tree.insert(2, Vector::new(1.1, 1.1)).unwrap();
        tree.insert(3, Vector::new(1.2, 1.2)).unwrap();
        assert!(tree.remove(2, Vector::new(1.1, 1.1)));
        assert_eq!(tree.entities(leaf).collect::<Vec<_>>(), vec![1, 3]);
    }
}
