//! Monte Carlo path tracing.
//!
//! [`ray_color`] estimates the light arriving along a ray by following it
//! through up to `max_depth` scattering events. [`render`] averages many
//! jittered estimates per pixel over the whole frame, in parallel.

use super::camera::Camera;
use super::error::RenderError;
use super::hit::Hit;
use super::image::Image;
use super::ray::Ray;
use super::vec::Color;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

// t_min prevents hitting very near surfaces, aka shadow acne
const T_MIN: f64 = 0.001;

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_width: u32,
    pub aspect_ratio: f64,
    pub samples_per_pixel: u32,
    /// Maximum number of bounces before a path stops contributing light.
    pub max_depth: u32,
    /// Base seed for the per-scanline generators. `None` picks one at random.
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            aspect_ratio: 16.0 / 9.0,
            samples_per_pixel: 100,
            max_depth: 50,
            seed: None,
        }
    }
}

impl RenderConfig {
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f64) / self.aspect_ratio) as u32
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(RenderError::InvalidAspectRatio(self.aspect_ratio));
        }
        // Pixel coordinates are divided by (width - 1) and (height - 1)
        if self.image_width < 2 {
            return Err(RenderError::ImageTooNarrow(self.image_width));
        }
        if self.image_height() < 2 {
            return Err(RenderError::ImageTooShort(self.image_height()));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::NoSamples);
        }
        Ok(())
    }
}

/// Radiance arriving along `ray`, with `depth` bounces left.
pub fn ray_color(ray: &Ray, world: &dyn Hit, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        // Too many bounces! Assume all energy lost
        return Color::zero();
    }

    if let Some(hit) = world.hit(ray, T_MIN, f64::INFINITY) {
        match hit.material.scatter(ray, &hit, rng) {
            // Each bounce filters the light by the surface's attenuation
            Some((attenuation, scattered)) => {
                attenuation * ray_color(&scattered, world, depth - 1, rng)
            }
            None => Color::zero(),
        }
    } else {
        sky_color(ray)
    }
}

/// Background light: white at the horizon below, blue straight up.
pub fn sky_color(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalized();
    let t = (unit_direction.y() + 1.0) * 0.5;
    let from = Color::new(1.0, 1.0, 1.0);
    let to = Color::new(0.5, 0.7, 1.0);
    (1.0 - t) * from + t * to
}

/// Gamma 2 correction.
pub fn linear_to_gamma(color: Color) -> Color {
    let channel = |c: f64| if c > 0.0 { c.sqrt() } else { 0.0 };
    Color::new(channel(color.x()), channel(color.y()), channel(color.z()))
}

/// Average `samples_per_pixel` jittered estimates for pixel `(i, j)`, where
/// `j = 0` is the bottom scanline, and gamma-correct the result.
///
/// `config` must pass [`RenderConfig::validate`]: the image needs at least
/// two pixels on each axis and at least one sample.
pub fn sample_pixel(
    camera: &Camera,
    world: &dyn Hit,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    debug_assert!(config.validate().is_ok(), "invalid render config: {:?}", config);
    let width = config.image_width;
    let height = config.image_height();

    let mut pixel_color = Color::zero();
    for _ in 0..config.samples_per_pixel {
        let random_u: f64 = rng.gen();
        let random_v: f64 = rng.gen();

        let u = (i as f64 + random_u) / ((width - 1) as f64);
        let v = (j as f64 + random_v) / ((height - 1) as f64);

        let ray = camera.get_ray(u, v, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    linear_to_gamma(pixel_color / config.samples_per_pixel as f64)
}

/// Render the full frame.
///
/// Scanlines are traced in parallel. Each one owns a generator seeded from
/// the base seed and its row index, so a fixed seed reproduces the image
/// regardless of how rows are scheduled.
pub fn render(
    camera: &Camera,
    world: &dyn Hit,
    config: &RenderConfig,
) -> Result<Image, RenderError> {
    config.validate()?;

    let width = config.image_width;
    let height = config.image_height();
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());

    info!(
        "rendering {}x{} at {} samples per pixel, max depth {}, seed {}",
        width, height, config.samples_per_pixel, config.max_depth, seed
    );
    let start = Instant::now();
    let remaining = AtomicU32::new(height);

    // Top scanline first
    let scanlines: Vec<Vec<Color>> = (0..height)
        .into_par_iter()
        .rev()
        .map(|j| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(j as u64));
            let scanline: Vec<Color> = (0..width)
                .map(|i| sample_pixel(camera, world, i, j, config, &mut rng))
                .collect();

            let left = remaining.fetch_sub(1, Ordering::Relaxed) - 1;
            debug!("scanlines remaining: {}", left);
            scanline
        })
        .collect();

    info!("done in {:.2} seconds", start.elapsed().as_secs_f64());
    Ok(Image::new(
        width,
        height,
        scanlines.into_iter().flatten().collect(),
    ))
}
