use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BspError {
    InvalidRegion {
        tl_x: f32,
        tl_y: f32,
        br_x: f32,
        br_y: f32,
    },
    DepthTooLarge { depth: u32, max: u32 },
}

pub type BspResult<T> = Result<T, BspError>;

impl fmt::Display for BspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BspError::InvalidRegion {
                tl_x,
                tl_y,
                br_x,
                br_y,
            } => {
                write!(
                    f,
                    "region corners must be finite with tl < br on both axes (tl: ({}, {}), br: ({}, {}))",
                    tl_x, tl_y, br_x, br_y
                )
            }
            BspError::DepthTooLarge { depth, max } => {
                write!(f, "tree depth must be at most {} (depth: {})", max, depth)
            }
        }
    }
}

impl std::error::Error for BspError {}
