use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// Represents a vector in 2D space.
///
/// Positions and headings are both expressed with this type. Headings are
/// expected to be normalized before rotation or angle queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2D {
    /// Value along the x-axis.
    pub x: f64,
    /// Value along the y-axis.
    pub y: f64,
}

impl Default for Vec2D {
    fn default() -> Self {
        Vec2D { x: 0.0, y: 0.0 }
    }
}

impl Vec2D {
    pub fn new(x: f64, y: f64) -> Self {
        Vec2D { x, y }
    }

    /// Returns the length of the vector.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Sets this vector's length to 1 without changing its direction.
    pub fn normalize(&mut self) {
        let len = self.length();
        if len != 0.0 {
            self.x /= len;
            self.y /= len;
        }
    }

    /// Returns the normalized copy of this vector.
    pub fn normalized(&self) -> Vec2D {
        let mut v = *self;
        v.normalize();
        v
    }

    /// Clamps both components into the range -1..1.
    pub fn clamp(&mut self) {
        self.x = self.x.clamp(-1.0, 1.0);
        self.y = self.y.clamp(-1.0, 1.0);
    }

    /// Rotates this vector clockwise by the given degrees.
    ///
    /// Requires that this vector be normalized. The result is re-clamped to
    /// the unit box because sin/cos can drift slightly outside the valid
    /// range under floating point.
    pub fn rotate(&mut self, degrees: f64) {
        let radians = (degrees / 180.0) * std::f64::consts::PI;

        let new_x = self.x * radians.cos() - self.y * radians.sin();
        let new_y = self.x * radians.sin() + self.y * radians.cos();

        self.x = new_x;
        self.y = new_y;

        self.clamp();
    }

    /// Returns the angle measured in degrees clockwise from up.
    ///
    /// Requires that this vector be normalized.
    pub fn to_angle(&self) -> f64 {
        // cos(theta) against the "up" vector (0, 1) is just y
        let mut theta = (-self.y).acos();

        if self.x < 0.0 {
            theta = -theta;
        }

        theta * (180.0 / std::f64::consts::PI)
    }
}

impl Add for Vec2D {
    type Output = Vec2D;

    fn add(self, other: Vec2D) -> Vec2D {
        Vec2D::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vec2D {
    fn add_assign(&mut self, other: Vec2D) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2D {
    type Output = Vec2D;

    fn sub(self, other: Vec2D) -> Vec2D {
        Vec2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vec2D {
    type Output = Vec2D;

    /// Scales the vector without changing its direction.
    fn mul(self, s: f64) -> Vec2D {
        Vec2D::new(self.x * s, self.y * s)
    }
}
