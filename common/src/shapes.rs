use crate::vector::Vector;
use rand::Rng;

/// Axis-aligned rectangle spanned by its top-left and bottom-right corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Region {
    pub tl: Vector,
    pub br: Vector,
}

impl Region {
    pub const fn new(tl: Vector, br: Vector) -> Self {
        Self { tl, br }
    }

    pub fn from_extent(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            tl: Vector::new(min_x, min_y),
            br: Vector::new(max_x, max_y),
        }
    }

    pub fn width(&self) -> f32 {
        self.br.x - self.tl.x
    }

    pub fn height(&self) -> f32 {
        self.br.y - self.tl.y
    }

    pub fn center(&self) -> Vector {
        Vector::new(
            (self.tl.x + self.br.x) / 2.0,
            (self.tl.y + self.br.y) / 2.0,
        )
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Finite corners with strictly positive width and height.
    pub fn is_valid(&self) -> bool {
        self.tl.is_finite() && self.br.is_finite() && self.tl.x < self.br.x && self.tl.y < self.br.y
    }

    /// Strict on both axes: points on the border are outside.
    pub fn contains(&self, point: Vector) -> bool {
        self.tl.x < point.x && point.x < self.br.x && self.tl.y < point.y && point.y < self.br.y
    }

    /// Conservative reachability test used to prune nearest-neighbour
    /// searches.
    ///
    /// Returns `false` only when `point` is outside and at least `radius`
    /// away from all four border lines. In that case every point of the
    /// closed rectangle is at least `radius` away from `point`, so nothing
    /// in here can beat the radius. The converse does not hold: a point can
    /// be near one border line and still far from the rectangle, so `true`
    /// does not mean the region is actually in reach.
    pub fn within_heuristic(&self, point: Vector, radius: f32) -> bool {
        if self.contains(point) {
            return true;
        }
        (self.tl.x - point.x).abs() < radius
            || (self.br.x - point.x).abs() < radius
            || (self.tl.y - point.y).abs() < radius
            || (self.br.y - point.y).abs() < radius
    }

    /// Whether the closed disc around `center` fits in the closed rectangle.
    pub fn contains_disc(&self, center: Vector, radius: f32) -> bool {
        center.x - radius >= self.tl.x
            && center.x + radius <= self.br.x
            && center.y - radius >= self.tl.y
            && center.y + radius <= self.br.y
    }

    /// Halves along x: left then right.
    pub fn split_x(&self) -> (Region, Region) {
        let mid = (self.tl.x + self.br.x) / 2.0;
        (
            Region::new(self.tl, Vector::new(mid, self.br.y)),
            Region::new(Vector::new(mid, self.tl.y), self.br),
        )
    }

    /// Halves along y: top then bottom.
    pub fn split_y(&self) -> (Region, Region) {
        let mid = (self.tl.y + self.br.y) / 2.0;
        (
            Region::new(self.tl, Vector::new(self.br.x, mid)),
            Region::new(Vector::new(self.tl.x, mid), self.br),
        )
    }

    pub fn random_point_inside<R: Rng>(&self, rng: &mut R) -> Vector {
        Vector::new(
            safe_randf32(rng, self.tl.x, self.br.x),
            safe_randf32(rng, self.tl.y, self.br.y),
        )
    }
}

// Open interval so the sample is strictly inside.
fn safe_randf32<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    let value = rng.gen_range(min..max);
    if value <= min {
        return (min + max) / 2.0;
    }
    value
}
