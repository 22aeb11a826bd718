use super::hit::HitRecord;
use super::ray::Ray;
use super::sampling;
use super::vec::{Color, Vec3};
use rand::{Rng, RngCore};

pub trait Scatter: Send + Sync {
    /// Attenuation and scattered ray, or `None` if the ray is absorbed.
    fn scatter(
        &self,
        incident: &Ray,
        hit: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)>;
}

/// A diffuse surface, described by how it picks a bounce direction.
pub trait DiffuseModel: Send + Sync {
    fn scatter_direction(&self, hit: &HitRecord, rng: &mut dyn RngCore) -> Vec3;
    fn albedo(&self) -> Color;
}

impl<T> Scatter for T
where
    T: DiffuseModel,
{
    // Note we could just as well only scatter with some probability p and have attenuation be albedo/p
    fn scatter(
        &self,
        _incident: &Ray,
        hit: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        let mut scatter_direction = self.scatter_direction(hit, rng);

        if scatter_direction.near_zero() {
            // Degenerate case -- we have sampled the direction exactly opposite of the normal,
            // causing a ray with little/no magnitude. Just scatter along normal.
            scatter_direction = hit.normal;
        }

        Some((self.albedo(), Ray::new(hit.position, scatter_direction)))
    }
}

pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl DiffuseModel for Lambertian {
    fn albedo(&self) -> Color {
        self.albedo
    }

    fn scatter_direction(&self, hit: &HitRecord, rng: &mut dyn RngCore) -> Vec3 {
        // Reflect in the direction of the normal modulated by a random vector on the unit sphere.
        // This scales by cos(theta) where theta is angle from the normal
        hit.normal + sampling::random_unit_vector(rng)
    }
}

/// Diffuse surface that scatters uniformly over the hemisphere around the normal,
/// with no dependence on the angle from the normal.
pub struct HemisphericDiffuse {
    albedo: Color,
}

impl HemisphericDiffuse {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl DiffuseModel for HemisphericDiffuse {
    fn albedo(&self) -> Color {
        self.albedo
    }

    fn scatter_direction(&self, hit: &HitRecord, rng: &mut dyn RngCore) -> Vec3 {
        sampling::random_in_hemisphere(hit.normal, rng)
    }
}

pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// `fuzz` is clamped to [0, 1]; 0 is a perfect mirror.
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }
}

impl Scatter for Metal {
    fn scatter(
        &self,
        incident: &Ray,
        hit: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        let reflected = incident.direction().normalized().reflect(hit.normal);
        let scatter_direction = reflected + self.fuzz * sampling::random_in_unit_sphere(rng);
        let reflection = Ray::new(hit.position, scatter_direction);

        // Make sure the fuzz has not put us inside the surface
        if reflection.direction().dot(hit.normal) > 0.0 {
            Some((self.albedo, reflection))
        } else {
            None
        }
    }
}

pub struct Dielectric {
    refraction_index: f64,
}

impl Dielectric {
    pub fn new(refraction_index: f64) -> Self {
        Self { refraction_index }
    }

    // Schlick's approximation of the Fresnel reflectance
    fn reflectance(cosine: f64, refraction_ratio: f64) -> f64 {
        let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Scatter for Dielectric {
    fn scatter(
        &self,
        incident: &Ray,
        hit: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        // Entering the medium from the front face, leaving it from the back
        let refraction_ratio = if hit.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = incident.direction().normalized();
        let cos_theta = (-unit_direction).dot(hit.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = refraction_ratio * sin_theta > 1.0;
        let direction = if cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > rng.gen::<f64>()
        {
            unit_direction.reflect(hit.normal)
        } else {
            unit_direction.refract(hit.normal, refraction_ratio)
        };

        Some((Color::one(), Ray::new(hit.position, direction)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Point3;
    use approx::assert_relative_eq;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record<'a>(ray: &Ray, outward_normal: Vec3, material: &'a dyn Scatter) -> HitRecord<'a> {
        HitRecord::new(ray, 1.0, Point3::zero(), outward_normal, material)
    }

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a.x(), b.x(), epsilon = 1e-12);
        assert_relative_eq!(a.y(), b.y(), epsilon = 1e-12);
        assert_relative_eq!(a.z(), b.z(), epsilon = 1e-12);
    }

    // Every uniform f64 draw is just below 1.0, so Schlick never picks reflection
    fn always_refract() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn test_lambertian_scatters_off_the_surface() {
        let material = Lambertian::new(Color::new(0.1, 0.2, 0.3));
        let incident = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = record(&incident, Vec3::new(0.0, 0.0, 1.0), &material);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let (attenuation, scattered) = material.scatter(&incident, &hit, &mut rng).unwrap();
            assert_eq!(attenuation, Color::new(0.1, 0.2, 0.3));
            assert_eq!(scattered.origin(), hit.position);
            // normal + unit vector never points below the tangent plane
            assert!(scattered.direction().dot(hit.normal) >= 0.0);
            assert!(!scattered.direction().near_zero());
        }
    }

    #[test]
    fn test_hemispheric_diffuse_stays_in_hemisphere() {
        let material = HemisphericDiffuse::new(Color::new(0.5, 0.5, 0.5));
        let incident = Ray::new(Point3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let hit = record(&incident, Vec3::new(0.0, 1.0, 0.0), &material);
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..500 {
            let (_, scattered) = material.scatter(&incident, &hit, &mut rng).unwrap();
            assert!(scattered.direction().dot(hit.normal) >= 0.0);
        }
    }

    // Diffuse model whose sampled direction exactly cancels the normal
    struct Cancelling {
        albedo: Color,
    }

    impl DiffuseModel for Cancelling {
        fn albedo(&self) -> Color {
            self.albedo
        }

        fn scatter_direction(&self, hit: &HitRecord, _rng: &mut dyn RngCore) -> Vec3 {
            hit.normal - hit.normal
        }
    }

    #[test]
    fn test_degenerate_diffuse_direction_falls_back_to_normal() {
        let material = Cancelling {
            albedo: Color::new(0.3, 0.6, 0.9),
        };
        let incident = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = record(&incident, Vec3::new(0.0, 0.0, 1.0), &material);
        let mut rng = StdRng::seed_from_u64(4);

        let (attenuation, scattered) = material.scatter(&incident, &hit, &mut rng).unwrap();
        assert_eq!(attenuation, Color::new(0.3, 0.6, 0.9));
        assert_eq!(scattered.origin(), hit.position);
        assert_eq!(scattered.direction(), hit.normal);
    }

    #[test]
    fn test_metal_without_fuzz_is_a_mirror() {
        let material = Metal::new(Color::new(0.8, 0.6, 0.2), 0.0);
        let incident = Ray::new(Point3::new(-1.0, 0.0, 1.0), Vec3::new(1.0, 0.0, -1.0));
        let hit = record(&incident, Vec3::new(0.0, 0.0, 1.0), &material);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..10 {
            let (attenuation, scattered) = material.scatter(&incident, &hit, &mut rng).unwrap();
            assert_eq!(attenuation, Color::new(0.8, 0.6, 0.2));
            assert_vec_eq(scattered.direction(), Vec3::new(1.0, 0.0, 1.0).normalized());
        }
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(Metal::new(Color::one(), 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::one(), -0.5).fuzz(), 0.0);
        assert_eq!(Metal::new(Color::one(), 0.3).fuzz(), 0.3);
    }

    #[test]
    fn test_metal_absorbs_rays_scattered_into_the_surface() {
        // At grazing incidence a fully fuzzy metal regularly pushes the
        // reflection below the surface
        let material = Metal::new(Color::one(), 1.0);
        let incident = Ray::new(Point3::new(-1.0, 0.0, 0.01), Vec3::new(1.0, 0.0, -0.01));
        let hit = record(&incident, Vec3::new(0.0, 0.0, 1.0), &material);
        let mut rng = StdRng::seed_from_u64(2);

        let mut absorbed = 0;
        for _ in 0..1000 {
            match material.scatter(&incident, &hit, &mut rng) {
                Some((_, scattered)) => assert!(scattered.direction().dot(hit.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_with_unit_index_passes_straight_through() {
        let material = Dielectric::new(1.0);
        let normal = Vec3::new(0.0, 0.0, 1.0);

        for direction in [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(0.2, -0.7, -0.3),
            Vec3::new(-3.0, 1.0, -0.5),
        ] {
            let incident = Ray::new(Point3::new(0.0, 0.0, 1.0), direction);
            let hit = record(&incident, normal, &material);
            let (attenuation, scattered) = material
                .scatter(&incident, &hit, &mut always_refract())
                .unwrap();
            assert_eq!(attenuation, Color::one());
            assert_vec_eq(scattered.direction(), direction.normalized());
        }
    }

    #[test]
    fn test_dielectric_bends_towards_normal_when_entering() {
        let material = Dielectric::new(1.5);
        let incident = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, -1.0));
        let hit = record(&incident, Vec3::new(0.0, 0.0, 1.0), &material);

        let (_, scattered) = material
            .scatter(&incident, &hit, &mut always_refract())
            .unwrap();
        let out = scattered.direction();

        // Snell: sin(theta_t) = sin(45 deg) / 1.5
        assert_relative_eq!(out.length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(out.x(), (0.5f64).sqrt() / 1.5, epsilon = 1e-12);
        assert!(out.z() < 0.0);
    }

    #[test]
    fn test_dielectric_reflects_when_draw_falls_under_schlick() {
        let material = Dielectric::new(1.5);
        let incident = Ray::new(Point3::new(-1.0, 0.0, 1.0), Vec3::new(1.0, 0.0, -1.0));
        let hit = record(&incident, Vec3::new(0.0, 0.0, 1.0), &material);
        assert!(hit.front_face);

        // A draw of 0.0 is below any positive reflectance, and at 45 degrees
        // into glass refraction is possible, so only Schlick picks reflection
        let mut rng = StepRng::new(0, 0);
        let (attenuation, scattered) = material.scatter(&incident, &hit, &mut rng).unwrap();
        assert_eq!(attenuation, Color::one());
        assert_vec_eq(scattered.direction(), Vec3::new(1.0, 0.0, 1.0).normalized());
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Dielectric::new(1.5);
        // Leaving the glass at 60 degrees: 1.5 * sin(60) > 1
        let direction = Vec3::new(3.0f64.sqrt() / 2.0, 0.0, 0.5);
        let incident = Ray::new(Point3::zero(), direction);
        let hit = record(&incident, Vec3::new(0.0, 0.0, 1.0), &material);
        assert!(!hit.front_face);

        let (attenuation, scattered) = material
            .scatter(&incident, &hit, &mut always_refract())
            .unwrap();
        assert_eq!(attenuation, Color::one());
        assert_vec_eq(
            scattered.direction(),
            Vec3::new(3.0f64.sqrt() / 2.0, 0.0, -0.5),
        );
    }

    #[test]
    fn test_schlick_reflectance_bounds() {
        assert_relative_eq!(Dielectric::reflectance(1.0, 1.0 / 1.5), 0.04, epsilon = 1e-12);
        assert_relative_eq!(Dielectric::reflectance(0.0, 1.0 / 1.5), 1.0, epsilon = 1e-12);
    }
}
