use common::{Region, Vector};
use smallvec::SmallVec;

/// Index of a node in the tree's arena. Stable for the lifetime of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    X,
    Y,
}

impl Axis {
    // Even remaining depth splits left/right, odd splits top/bottom.
    #[inline(always)]
    pub(crate) fn for_depth(depth: u32) -> Self {
        if depth % 2 == 0 {
            Axis::X
        } else {
            Axis::Y
        }
    }

    #[inline(always)]
    pub(crate) fn coord(self, point: Vector) -> f32 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
        }
    }

    pub(crate) fn split(self, region: &Region) -> (Region, Region, f32) {
        match self {
            Axis::X => {
                let (first, second) = region.split_x();
                (first, second, first.br.x)
            }
            Axis::Y => {
                let (first, second) = region.split_y();
                (first, second, first.br.y)
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Split {
    pub(crate) axis: Axis,
    pub(crate) mid: f32,
    pub(crate) children: [NodeId; 2],
}

impl Split {
    /// Half-open routing: below the midpoint goes first, everything else
    /// second. Points on the dividing line always end up in the second child.
    #[inline(always)]
    pub(crate) fn route(&self, point: Vector) -> NodeId {
        if self.axis.coord(point) < self.mid {
            self.children[0]
        } else {
            self.children[1]
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct LeafEntry<K> {
    pub(crate) id: K,
    pub(crate) position: Vector,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) depth: u32,
    pub(crate) region: Region,
    pub(crate) parent: Option<NodeId>,
    pub(crate) split: Option<Split>,
    pub(crate) entities: Vec<LeafEntry<K>>,
    pub(crate) descendant_count: usize,
}

impl<K> Node<K> {
    pub(crate) fn new(depth: u32, region: Region, parent: Option<NodeId>) -> Self {
        Self {
            depth,
            region,
            parent,
            split: None,
            entities: Vec::new(),
            descendant_count: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn is_leaf(&self) -> bool {
        self.split.is_none()
    }
}

pub(crate) type NodeStack = SmallVec<[NodeId; 64]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_alternates_with_depth() {
        assert_eq!(Axis::for_depth(0), Axis::X);
        assert_eq!(Axis::for_depth(1), Axis::Y);
        assert_eq!(Axis::for_depth(2), Axis::X);
        assert_eq!(Axis::for_depth(7), Axis::Y);
    }

    #[test]
    fn split_routes_boundary_to_second_child() {
        let split = Split {
            axis: Axis::X,
            mid: 2.0,
            children: [NodeId(1), NodeId(2)],
        };
        assert_eq!(split.route(Vector::new(1.999, 5.0)), NodeId(1));
        assert_eq!(split.route(Vector::new(2.0, 5.0)), NodeId(2));
        assert_eq!(split.route(Vector::new(3.0, 5.0)), NodeId(2));
    }

    #[test]
    fn axis_split_reports_shared_midpoint() {
        let region = Region::from_extent(0.0, 0.0, 4.0, 8.0);
        let (top, bottom, mid) = Axis::Y.split(&region);
        assert_eq!(mid, 4.0);
        assert_eq!(top.br.y, mid);
        assert_eq!(bottom.tl.y, mid);
    }
}
