use std::ops::{Add, AddAssign, Mul, Neg, Rem, Sub, SubAssign};

/// A 2-D position or displacement.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector rotated by `angle` radians, scaled to `magnitude`.
    pub fn angled(angle: f32, magnitude: f32) -> Self {
        Self {
            x: angle.cos() * magnitude,
            y: angle.sin() * magnitude,
        }
    }

    pub fn norm_sq(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn norm(&self) -> f32 {
        self.norm_sq().sqrt()
    }

    // Zero stays zero instead of turning into NaNs.
    pub fn normalize(&self) -> Self {
        let norm = self.norm();
        if norm == 0.0 {
            return *self;
        }
        *self * (1.0 / norm)
    }

    pub fn distance(&self, other: Vector) -> f32 {
        (*self - other).norm()
    }

    /// Wraps the vector into `[0, area.x) x [0, area.y)`.
    pub fn wrap(&self, area: Vector) -> Self {
        Self {
            x: self.x.rem_euclid(area.x),
            y: self.y.rem_euclid(area.y),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, other: Vector) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, other: Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, other: Vector) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;

    fn mul(self, scale: f32) -> Vector {
        Vector::new(self.x * scale, self.y * scale)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self * -1.0
    }
}

// Component-wise, same sign rules as `f32 % f32`. Use `wrap` for a
// non-negative result.
impl Rem for Vector {
    type Output = Vector;

    fn rem(self, other: Vector) -> Vector {
        Vector::new(self.x % other.x, self.y % other.y)
    }
}

impl From<(f32, f32)> for Vector {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Anything that can be stored in a spatial index.
///
/// `id` is the entity's identity: two values with the same id are the same
/// entity, whatever their positions.
pub trait Spatial {
    type Id: Copy + Eq;

    fn id(&self) -> Self::Id;
    fn position(&self) -> Vector;
}
