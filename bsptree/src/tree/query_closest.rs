use super::types::{NodeId, NodeStack};
use super::SpatialIndex;
use common::{Spatial, Vector};
use log::trace;

/// Running state of one nearest-neighbour search.
struct Search<K> {
    position: Vector,
    exclude: Option<K>,
    radius: f32,
    best: Option<(f32, K)>,
}

impl<K: Copy + Eq> SpatialIndex<K> {
    /// Nearest other entity strictly closer than `max_distance` to
    /// `position`, with its distance. `id` itself is never returned.
    pub fn closest(&self, id: K, position: Vector, max_distance: f32) -> Option<(f32, K)> {
        self.closest_from(NodeId::ROOT, id, position, max_distance)
    }

    /// Same as [`closest`](Self::closest), starting from `start`. Passing the
    /// query entity's own leaf keeps short-range searches local.
    ///
    /// The search runs over the smallest subtree around `start` that
    /// contains `position`. It then climbs one parent at a time, searching
    /// only the sibling it has not seen yet, until the disc of the best
    /// distance so far fits inside the current node. Candidates outside that
    /// node cannot beat the disc, so the climb stops there. With an infinite
    /// `max_distance` it reaches the root and the answer is the global
    /// nearest neighbour.
    ///
    /// Subtrees are skipped when empty or when
    /// [`Region::within_heuristic`](common::Region::within_heuristic)
    /// rejects them. That test only ever keeps too much, so every entity
    /// closer than the radius is still found.
    pub fn closest_from(
        &self,
        start: NodeId,
        id: K,
        position: Vector,
        max_distance: f32,
    ) -> Option<(f32, K)> {
        self.closest_search(start, Some(id), position, max_distance)
    }

    pub fn closest_or_none(&self, id: K, position: Vector, max_distance: f32) -> Option<K> {
        self.closest(id, position, max_distance)
            .map(|(_, neighbour)| neighbour)
    }

    pub fn closest_from_or_none(
        &self,
        start: NodeId,
        id: K,
        position: Vector,
        max_distance: f32,
    ) -> Option<K> {
        self.closest_from(start, id, position, max_distance)
            .map(|(_, neighbour)| neighbour)
    }

    /// Nearest entity to a free point; nothing is excluded.
    pub fn closest_to_point(&self, position: Vector, max_distance: f32) -> Option<(f32, K)> {
        self.closest_search(NodeId::ROOT, None, position, max_distance)
    }

    pub fn closest_entity<E: Spatial<Id = K>>(
        &self,
        entity: &E,
        max_distance: f32,
    ) -> Option<(f32, K)> {
        self.closest(entity.id(), entity.position(), max_distance)
    }

    pub fn closest_entity_or_none<E: Spatial<Id = K>>(
        &self,
        entity: &E,
        max_distance: f32,
    ) -> Option<K> {
        self.closest_or_none(entity.id(), entity.position(), max_distance)
    }

    fn closest_search(
        &self,
        start: NodeId,
        exclude: Option<K>,
        position: Vector,
        max_distance: f32,
    ) -> Option<(f32, K)> {
        let mut search = Search {
            position,
            exclude,
            radius: max_distance,
            best: None,
        };

        let mut node_id = self
            .containing_ancestor(start, position)
            .unwrap_or(NodeId::ROOT);
        self.search_subtree(node_id, None, &mut search);

        loop {
            let node = self.node(node_id);
            let Some(parent) = node.parent else {
                break;
            };
            if node.region.contains_disc(position, search.radius) {
                break;
            }
            trace!(
                "closest: escalating from {:?} to {:?} (radius {})",
                node_id,
                parent,
                search.radius
            );
            self.search_subtree(parent, Some(node_id), &mut search);
            node_id = parent;
        }

        search.best
    }

    // Depth-first, first child before second, so the second child is tested
    // against the radius the first one already tightened.
    fn search_subtree(&self, root: NodeId, skip: Option<NodeId>, search: &mut Search<K>) {
        let mut stack = NodeStack::new();
        stack.push(root);

        while let Some(node_id) = stack.pop() {
            if Some(node_id) == skip {
                continue;
            }
            let node = self.node(node_id);
            if node.descendant_count == 0
                || !node.region.within_heuristic(search.position, search.radius)
            {
                continue;
            }

            match node.split {
                Some(split) => {
                    stack.push(split.children[1]);
                    stack.push(split.children[0]);
                }
                None => {
                    for entry in &node.entities {
                        if Some(entry.id) == search.exclude {
                            continue;
                        }
                        let distance = search.position.distance(entry.position);
                        if distance < search.radius {
                            search.radius = distance;
                            search.best = Some((distance, entry.id));
                        }
                    }
                }
            }
        }
    }
}
