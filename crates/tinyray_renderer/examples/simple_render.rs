//! Simple Whitted ray tracer example.
//!
//! Builds a scene in code, renders it and saves a PPM.

use std::fs::File;
use std::io::{BufWriter, Write};

use tinyray_core::material::{GLASS, IVORY, MIRROR, RED_RUBBER};
use tinyray_core::RenderSettings;
use tinyray_renderer::{
    render, Background, Camera, Color, ImageBuffer, Scene, Sphere, TraceContext, Vec3,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("tinyray - Simple Example");
    println!("========================");

    let scene = build_scene();
    let camera = Camera::look_at(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))?
        .with_lens(1.05, 0.0, 1.0);
    let background = Background::new(Color::new(0.2, 0.7, 0.8));
    let settings = RenderSettings::default().with_max_depth(4);

    let (width, height) = (800, 600);
    println!("Rendering {}x{} @ depth {}...", width, height, settings.max_depth);

    let start = std::time::Instant::now();
    let ctx = TraceContext::new(&scene, &camera, &background);
    let image = render(&ctx, width, height, &settings);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename)?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> Scene {
    let spheres = vec![
        Sphere::new(Vec3::new(-3.0, 0.0, -16.0), 2.0, IVORY),
        Sphere::new(Vec3::new(-1.0, -1.5, -12.0), 2.0, GLASS),
        Sphere::new(Vec3::new(1.5, -0.5, -18.0), 3.0, RED_RUBBER),
        Sphere::new(Vec3::new(7.0, 5.0, -18.0), 4.0, MIRROR),
    ];
    let lights = vec![
        Vec3::new(-20.0, 20.0, 20.0),
        Vec3::new(30.0, 50.0, -25.0),
        Vec3::new(30.0, 20.0, 30.0),
    ];

    println!("Created {} spheres, {} lights", spheres.len(), lights.len());
    Scene::new(spheres, lights)
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    write!(writer, "P6\n{} {}\n255\n", image.width, image.height)?;
    writer.write_all(&image.to_rgb8())?;

    Ok(())
}
