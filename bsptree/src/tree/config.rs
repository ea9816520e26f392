#[derive(Debug, Clone)]
pub struct Config {
    /// Number of split levels below the root. The tree has
    /// `2^(depth + 1) - 1` nodes, all built up front.
    pub depth: u32,
    /// Entries reserved per leaf at construction.
    pub leaf_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            depth: 8,
            leaf_capacity: 4,
        }
    }
}
