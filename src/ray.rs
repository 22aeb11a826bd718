use super::vec::{Point3, Vec3};

/// A half-line `origin + t * direction`. The direction need not be unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vec3,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    // No range check: callers compare t against their own bounds
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }
}
