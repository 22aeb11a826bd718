use super::material::Scatter;
use super::ray::Ray;
use super::vec::{Point3, Vec3};

/// Intersection found by a [`Hit`] query.
///
/// Borrows the material of the primitive that was hit; it lives no longer
/// than the world it came from.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    pub position: Point3,
    pub normal: Vec3,
    pub t: f64,
    pub front_face: bool,
    pub material: &'a dyn Scatter,
}

impl<'a> HitRecord<'a> {
    /// Build a record whose normal points against the incoming ray.
    pub fn new(
        ray: &Ray,
        t: f64,
        position: Point3,
        outward_normal: Vec3,
        material: &'a dyn Scatter,
    ) -> Self {
        let mut record = Self {
            position,
            normal: outward_normal,
            t,
            front_face: true,
            material,
        };
        record.set_face_normal(ray, outward_normal);
        record
    }

    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // Point normal against ray for faster shading calc (skip dot prod)
        // As a result we have to track if this is front/back face of surface
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        }
    }
}

pub trait Hit: Send + Sync {
    /// Closest intersection with `t` strictly inside `(t_min, t_max)`.
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>>;
}

/// Ordered collection of primitives, searched linearly for the nearest hit.
pub type World = Vec<Box<dyn Hit>>;

impl Hit for World {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        let mut closest_t = t_max;
        let mut closest_record = None;

        // Shrinking the upper bound means a later object can only replace
        // the current record with a strictly nearer hit
        for object in self {
            if let Some(record) = object.hit(ray, t_min, closest_t) {
                closest_t = record.t;
                closest_record = Some(record);
            }
        }

        closest_record
    }
}
