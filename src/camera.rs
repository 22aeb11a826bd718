use super::ray::Ray;
use super::sampling;
use super::vec::{Point3, Vec3};
use rand::RngCore;

/// Thin-lens camera.
///
/// Rays start at a random point on the lens and pass through the focus
/// plane, so only geometry near `focus_distance` is sharp.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Point3,
    focus_plane_horizontal: Vec3,
    focus_plane_vertical: Vec3,
    focus_plane_lower_left_corner: Point3,
    camera_x: Vec3,
    camera_y: Vec3,
    camera_z: Vec3,
    lens_radius: f64,
}

impl Camera {
    pub fn new(
        origin: Point3,
        look_target: Point3,
        world_up: Vec3,
        vertical_fov_degrees: f64,
        aspect_ratio: f64,
        aperture: f64,
        focus_distance: f64,
    ) -> Self {
        // Viewport at unit distance from the lens
        let fov = vertical_fov_degrees.to_radians();
        let half_height = (fov / 2.0).tan();
        let half_width = aspect_ratio * half_height;

        // Local coordinate system:
        // Camera faces along -z
        let camera_z = (origin - look_target).normalized();
        let camera_x = world_up.cross(camera_z).normalized();
        let camera_y = camera_z.cross(camera_x);

        // Focus plane:
        // Virtual film plane in the world, where rays from anywhere on the lens pass through
        // the same world point for a given uv. Similar triangles scale the unit viewport out
        // to the focus distance.
        let focus_plane_horizontal = 2.0 * half_width * focus_distance * camera_x;
        let focus_plane_vertical = 2.0 * half_height * focus_distance * camera_y;
        let focus_plane_lower_left_corner = origin
            - half_width * focus_distance * camera_x
            - half_height * focus_distance * camera_y
            - focus_distance * camera_z;

        Self {
            origin,
            focus_plane_horizontal,
            focus_plane_vertical,
            focus_plane_lower_left_corner,
            camera_x,
            camera_y,
            camera_z,
            lens_radius: aperture / 2.0,
        }
    }

    /// Orthonormal basis `(u, v, w)`; the camera looks along `-w`.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.camera_x, self.camera_y, self.camera_z)
    }

    /// Ray through image-plane coordinates `(s, t)`, both in [0, 1] from the
    /// lower left corner.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let jitter = self.lens_radius * sampling::random_in_unit_disk(rng);
        let offset = self.camera_x * jitter.x() + self.camera_y * jitter.y();
        let position_on_lens = self.origin + offset;
        let position_on_focus_plane = self.focus_plane_lower_left_corner
            + s * self.focus_plane_horizontal
            + t * self.focus_plane_vertical;

        Ray::new(position_on_lens, position_on_focus_plane - position_on_lens)
    }
}
