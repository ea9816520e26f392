use super::config::Config;
use super::types::{Axis, LeafEntry, Node, NodeId, Split};
use super::SpatialIndex;
use crate::error::{BspError, BspResult};
use common::{Region, Vector};
use log::debug;

impl<K: Copy + Eq> SpatialIndex<K> {
    /// Deepest tree `new` accepts. Every level is built up front, so a tree
    /// of depth `d` holds `2^(d + 1) - 1` nodes; at this cap that is about
    /// two million nodes, well over a hundred megabytes before any entity is
    /// inserted.
    pub const MAX_DEPTH: u32 = 20;

    pub fn new(depth: u32, tl: Vector, br: Vector) -> BspResult<Self> {
        Self::new_with_config(
            Region::new(tl, br),
            Config {
                depth,
                ..Config::default()
            },
        )
    }

    pub fn new_with_config(region: Region, config: Config) -> BspResult<Self> {
        if !region.is_valid() {
            return Err(BspError::InvalidRegion {
                tl_x: region.tl.x,
                tl_y: region.tl.y,
                br_x: region.br.x,
                br_y: region.br.y,
            });
        }
        if config.depth > Self::MAX_DEPTH {
            return Err(BspError::DepthTooLarge {
                depth: config.depth,
                max: Self::MAX_DEPTH,
            });
        }

        let node_count = (1usize << (config.depth + 1)) - 1;
        let mut nodes = Vec::with_capacity(node_count);
        Self::build(&mut nodes, config.depth, region, None, config.leaf_capacity)?;
        debug_assert_eq!(nodes.len(), node_count);
        debug!(
            "built spatial index: depth {}, {} nodes, region {:?}",
            config.depth,
            nodes.len(),
            region
        );

        Ok(Self {
            nodes,
            depth: config.depth,
        })
    }

    fn build(
        nodes: &mut Vec<Node<K>>,
        depth: u32,
        region: Region,
        parent: Option<NodeId>,
        leaf_capacity: usize,
    ) -> BspResult<NodeId> {
        let id = NodeId(nodes.len() as u32);
        nodes.push(Node::new(depth, region, parent));
        if depth == 0 {
            nodes[id.index()].entities.reserve(leaf_capacity);
            return Ok(id);
        }

        let axis = Axis::for_depth(depth);
        let (first, second, mid) = axis.split(&region);
        // Float halving can collapse a child once the region gets tiny.
        for child in [&first, &second] {
            if !child.is_valid() {
                return Err(BspError::InvalidRegion {
                    tl_x: child.tl.x,
                    tl_y: child.tl.y,
                    br_x: child.br.x,
                    br_y: child.br.y,
                });
            }
        }
        let first = Self::build(nodes, depth - 1, first, Some(id), leaf_capacity)?;
        let second = Self::build(nodes, depth - 1, second, Some(id), leaf_capacity)?;
        nodes[id.index()].split = Some(Split {
            axis,
            mid,
            children: [first, second],
        });
        Ok(id)
    }

    #[inline(always)]
    pub(crate) fn node(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id.index()]
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Split levels below the root.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of entries in the whole tree.
    pub fn len(&self) -> usize {
        self.node(NodeId::ROOT).descendant_count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn region(&self, node: NodeId) -> Region {
        self.node(node).region
    }

    /// Remaining split levels below `node`; zero for leaves.
    pub fn node_depth(&self, node: NodeId) -> u32 {
        self.node(node).depth
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn children(&self, node: NodeId) -> Option<[NodeId; 2]> {
        self.node(node).split.map(|split| split.children)
    }

    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.node(node).is_leaf()
    }

    pub fn descendant_count(&self, node: NodeId) -> usize {
        self.node(node).descendant_count
    }

    pub fn contains(&self, node: NodeId, point: Vector) -> bool {
        self.node(node).region.contains(point)
    }

    /// Ids resident at `node`, in insertion order. Empty for internal nodes.
    pub fn entities(&self, node: NodeId) -> impl Iterator<Item = K> + '_ {
        self.node(node).entities.iter().map(|entry| entry.id)
    }

    /// Ids with the positions they were inserted at.
    pub fn entries(&self, node: NodeId) -> impl Iterator<Item = (K, Vector)> + '_ {
        self.node(node)
            .entities
            .iter()
            .map(|&LeafEntry { id, position }| (id, position))
    }

    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_leaf())
            .map(|(index, _)| NodeId(index as u32))
    }

    /// Leaf an insert of `point` would land in, or `None` outside the root.
    pub fn leaf_for(&self, point: Vector) -> Option<NodeId> {
        if !self.contains(NodeId::ROOT, point) {
            return None;
        }
        Some(self.descend(NodeId::ROOT, point))
    }

    pub fn all_node_regions(&self, regions: &mut Vec<Region>) {
        regions.extend(self.nodes.iter().map(|node| node.region));
    }

    /// First node on the way up from `start` that contains `point`.
    pub(crate) fn containing_ancestor(&self, start: NodeId, point: Vector) -> Option<NodeId> {
        let mut node_id = start;
        loop {
            let node = self.node(node_id);
            if node.region.contains(point) {
                return Some(node_id);
            }
            node_id = node.parent?;
        }
    }

    pub(crate) fn descend(&self, start: NodeId, point: Vector) -> NodeId {
        let mut node_id = start;
        while let Some(split) = self.node(node_id).split {
            node_id = split.route(point);
        }
        node_id
    }
}
