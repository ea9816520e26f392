pub mod shapes;
pub mod vector;

pub use shapes::Region;
pub use vector::{Spatial, Vector};
