pub mod error;
pub mod leaf_cache;
pub mod tree;

pub use common::{Region, Spatial, Vector};
pub use error::{BspError, BspResult};
pub use leaf_cache::LeafCache;
pub use tree::{Config, NodeId, SpatialIndex};
