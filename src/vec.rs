use std::ops::{Add, AddAssign, Div, Index, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    e: [f64; 3],
}

pub type Point3 = Vec3;
pub type Color = Vec3;

impl Vec3 {
    pub fn new(e0: f64, e1: f64, e2: f64) -> Self {
        Self { e: [e0, e1, e2] }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn one() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn x(self) -> f64 {
        self[0]
    }

    pub fn y(self) -> f64 {
        self[1]
    }

    pub fn z(self) -> f64 {
        self[2]
    }

    pub fn dot(self, other: Self) -> f64 {
        self[0] * other[0] + self[1] * other[1] + self[2] * other[2]
    }

    // Cheaper than length() when only comparing magnitudes
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn cross(self, other: Self) -> Self {
        Self {
            e: [
                self[1] * other[2] - self[2] * other[1],
                self[2] * other[0] - self[0] * other[2],
                self[0] * other[1] - self[1] * other[0],
            ],
        }
    }

    /// Unit vector in the direction of `self`.
    ///
    /// The zero vector has no direction: callers must not pass one. Release
    /// builds follow IEEE arithmetic and return NaN components.
    pub fn normalized(self) -> Self {
        let length = self.length();
        debug_assert!(length > 0.0, "cannot normalize a zero-length vector");
        self / length
    }

    /// True when every component is within 1e-8 of zero.
    pub fn near_zero(self) -> bool {
        const EPS: f64 = 1.0e-8;
        self[0].abs() < EPS && self[1].abs() < EPS && self[2].abs() < EPS
    }

    // Reflect across a unit normal vector n that points against self
    // Calculate the proj of self onto n in the direction of n and add it twice
    // Self is the incident vector
    pub fn reflect(self, n: Self) -> Self {
        self - 2.0 * self.dot(n) * n
    }

    // Vector form of snell's law, split into the components perpendicular
    // and parallel to n. Self is the unit incident vector.
    pub fn refract(self, n: Self, eta_i_over_eta_t: f64) -> Self {
        let cos_theta = (-self).dot(n).min(1.0);
        let refracted_perpendicular = eta_i_over_eta_t * (self + cos_theta * n);
        let refracted_parallel =
            -(1.0 - refracted_perpendicular.length_squared()).abs().sqrt() * n;
        refracted_perpendicular + refracted_parallel
    }

    /// Quantize a display-ready color to 8 bits per channel.
    ///
    /// Each channel is clamped to [0, 0.999] then scaled by 256 and truncated.
    pub fn to_rgb8(self) -> [u8; 3] {
        let quantize = |c: f64| (c.clamp(0.0, 0.999) * 256.0) as u8;
        [quantize(self[0]), quantize(self[1]), quantize(self[2])]
    }
}

impl Index<usize> for Vec3 {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.e[index]
    }
}

impl Add<Vec3> for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            e: [self[0] + rhs[0], self[1] + rhs[1], self[2] + rhs[2]],
        }
    }
}

impl AddAssign<Vec3> for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Add<f64> for Vec3 {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        Self {
            e: [self[0] + rhs, self[1] + rhs, self[2] + rhs],
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            e: [self[0] - rhs[0], self[1] - rhs[1], self[2] - rhs[2]],
        }
    }
}

impl Sub<f64> for Vec3 {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        Self {
            e: [self[0] - rhs, self[1] - rhs, self[2] - rhs],
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            e: [self[0] * rhs, self[1] * rhs, self[2] * rhs],
        }
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        rhs * self
    }
}

// Component-wise, used to apply attenuation to colors
impl Mul for Vec3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            e: [self[0] * rhs[0], self[1] * rhs[1], self[2] * rhs[2]],
        }
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self {
            e: [self[0] / rhs, self[1] / rhs, self[2] / rhs],
        }
    }
}

impl Div for Vec3 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self {
            e: [self[0] / rhs[0], self[1] / rhs[1], self[2] / rhs[2]],
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        (-1.0) * self
    }
}
