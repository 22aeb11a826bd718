use anyhow::Result;
use std::io::{stdout, BufWriter};
use std::sync::Arc;
use weekend_pathtracer::{
    render, Camera, Color, Dielectric, Lambertian, Metal, Point3, RenderConfig, Sphere, Vec3,
    World,
};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn scene() -> World {
    let material_ground = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let material_center = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let material_left = Arc::new(Dielectric::new(1.5));
    let material_right = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.0));

    vec![
        Box::new(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, material_ground)),
        Box::new(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, material_center)),
        Box::new(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.5, material_left.clone())),
        // Negative radius turns the glass sphere into a hollow bubble
        Box::new(Sphere::new(Point3::new(-1.0, 0.0, -1.0), -0.45, material_left)),
        Box::new(Sphere::new(Point3::new(1.0, 0.0, -1.0), 0.5, material_right)),
    ]
}

fn main() -> Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    // Image
    let config = RenderConfig {
        image_width: 400,
        aspect_ratio: 16.0 / 9.0,
        samples_per_pixel: 100,
        max_depth: 50,
        seed: None,
    };

    // World
    let world = scene();

    // Camera
    let look_from = Point3::new(3.0, 3.0, 2.0);
    let look_at = Point3::new(0.0, 0.0, -1.0);
    let camera = Camera::new(
        look_from,
        look_at,
        Vec3::new(0.0, 1.0, 0.0),
        20.0,
        config.aspect_ratio,
        2.0,
        (look_from - look_at).length(),
    );

    let image = render(&camera, &world, &config)?;
    image.write_ppm(&mut BufWriter::new(stdout().lock()))?;

    Ok(())
}
