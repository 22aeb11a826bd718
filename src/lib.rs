//! A Monte Carlo path tracer after "Ray Tracing in One Weekend".
//!
//! Scenes are lists of spheres with diffuse, metal and glass materials, seen
//! through a thin-lens camera. All randomness comes from a generator passed in
//! by the caller, so renders are reproducible from a seed.

pub mod camera;
pub mod error;
pub mod hit;
pub mod image;
pub mod material;
pub mod ray;
pub mod render;
pub mod sampling;
pub mod sphere;
pub mod vec;

pub use camera::Camera;
pub use error::RenderError;
pub use hit::{Hit, HitRecord, World};
pub use image::Image;
pub use material::{Dielectric, DiffuseModel, HemisphericDiffuse, Lambertian, Metal, Scatter};
pub use ray::Ray;
pub use render::{ray_color, render, sample_pixel, sky_color, RenderConfig};
pub use sphere::Sphere;
pub use vec::{Color, Point3, Vec3};
