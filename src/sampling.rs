//! Random directions and points used by the camera lens and the materials.
//!
//! Every helper draws from the generator it is handed so renders can be
//! reproduced from a seed.

use super::vec::Vec3;
use rand::Rng;

/// Uniform point inside the unit ball, by rejection from the [-1, 1] cube.
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform direction on the unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = random_in_unit_sphere(rng);
        // The ball sample can land on the origin, which has no direction
        if !p.near_zero() {
            return p.normalized();
        }
    }
}

/// Point in the unit ball on the same side of the surface as `normal`.
pub fn random_in_hemisphere<R: Rng + ?Sized>(normal: Vec3, rng: &mut R) -> Vec3 {
    let p = random_in_unit_sphere(rng);
    if p.dot(normal) > 0.0 {
        p
    } else {
        -p
    }
}

/// Uniform point inside the unit disk in the z = 0 plane.
pub fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
