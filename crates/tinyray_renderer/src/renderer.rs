//! Render driver.
//!
//! Maps every pixel to one or more primary rays, shades them with a
//! [`TraceContext`] and stores the result in an [`ImageBuffer`]. Pixels are
//! independent, so the framebuffer is filled in parallel with rayon.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tinyray_core::{RenderSettings, MAX_DEPTH_LIMIT};
use tinyray_math::{Color, Ray};

use crate::shading::TraceContext;

/// Row-major framebuffer of linear colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to packed RGB bytes (for saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb8(*c)).collect()
    }
}

/// Convert a color to 8-bit RGB.
///
/// Over-bright colors are scaled down by their largest component instead of
/// being clipped, which keeps their hue.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let scale = 255.0 / color.max_element().max(1.0);
    [
        (color.x * scale) as u8,
        (color.y * scale) as u8,
        (color.z * scale) as u8,
    ]
}

/// Independent random stream for one pixel.
fn pixel_rng(seed: u64, pixel_index: usize) -> StdRng {
    let stream = (pixel_index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(seed ^ stream)
}

/// Color of a single pixel.
///
/// The recursion limit comes from `settings.max_depth`, overriding the one
/// stored in `ctx`. Pinhole cameras trace one ray through the pixel center.
/// With an aperture, `samples_per_pixel` lens samples are averaged using a
/// random stream derived from the seed and the pixel index, so results do
/// not depend on evaluation order.
pub fn render_pixel(
    ctx: &TraceContext,
    pixel_index: usize,
    width: u32,
    height: u32,
    settings: &RenderSettings,
) -> Color {
    shade_pixel(&ctx.with_max_depth(settings.max_depth), pixel_index, width, height, settings)
}

fn shade_pixel(
    ctx: &TraceContext,
    pixel_index: usize,
    width: u32,
    height: u32,
    settings: &RenderSettings,
) -> Color {
    let camera = ctx.camera;

    if camera.is_pinhole() {
        let direction = camera.primary_ray(pixel_index, width, height);
        return ctx.cast_ray(&Ray::new(camera.position(), direction), 0);
    }

    let mut rng = pixel_rng(settings.seed, pixel_index);
    let samples = settings.samples_per_pixel.max(1);
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let ray = camera.primary_ray_dof(pixel_index, width, height, &mut rng);
        pixel_color += ctx.cast_ray(&ray, 0);
    }

    pixel_color / samples as f32
}

/// Render the entire image with the depth and sampling of `settings`.
pub fn render(
    ctx: &TraceContext,
    width: u32,
    height: u32,
    settings: &RenderSettings,
) -> ImageBuffer {
    let mut image = ImageBuffer::new(width, height);
    if settings.max_depth > MAX_DEPTH_LIMIT {
        log::warn!(
            "Max depth {} exceeds {}, clamping",
            settings.max_depth,
            MAX_DEPTH_LIMIT
        );
    }
    let ctx = ctx.with_max_depth(settings.max_depth);

    log::info!(
        "Rendering {}x{} (max depth {}, {} lens samples)",
        width,
        height,
        ctx.max_depth(),
        if ctx.camera.is_pinhole() { 1 } else { settings.samples_per_pixel }
    );

    let start = Instant::now();
    image
        .pixels
        .par_iter_mut()
        .enumerate()
        .for_each(|(pixel_index, pixel)| {
            *pixel = shade_pixel(&ctx, pixel_index, width, height, settings);
        });

    log::info!("Render time: {} ms", start.elapsed().as_millis());

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Background, Camera, Scene, Sphere};
    use tinyray_core::material::{IVORY, MIRROR};
    use tinyray_math::Vec3;

    const FALLBACK: Color = Color::new(0.2, 0.7, 0.8);

    fn one_sphere_scene() -> Scene {
        Scene::new(
            vec![Sphere::new(Vec3::new(0.0, 0.0, -5.0), 2.0, IVORY)],
            vec![Vec3::new(10.0, 10.0, 10.0)],
        )
    }

    #[test]
    fn test_color_to_rgb8() {
        assert_eq!(color_to_rgb8(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb8(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb8(Color::new(0.5, 0.25, 1.0)), [127, 63, 255]);

        // Over-bright: divided by the largest component
        assert_eq!(color_to_rgb8(Color::new(2.0, 1.0, 0.0)), [255, 127, 0]);
    }

    #[test]
    fn test_image_buffer_get_set() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Color::ONE);

        assert_eq!(image.get(2, 1), Color::ONE);
        assert_eq!(image.pixels[5], Color::ONE);
        assert_eq!(image.to_rgb8().len(), 3 * 2 * 3);
        assert_eq!(&image.to_rgb8()[15..], &[255, 255, 255]);
    }

    #[test]
    fn test_render_disk_on_background() {
        let scene = one_sphere_scene();
        let camera = Camera::look_at(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let background = Background::new(FALLBACK);
        let ctx = TraceContext::new(&scene, &camera, &background);

        let image = render(&ctx, 9, 9, &RenderSettings::default().with_max_depth(0));

        // Center pixel is lit ivory, corners see the background
        assert_ne!(image.get(4, 4), FALLBACK);
        assert!(image.get(4, 4).x > 0.2);
        assert_eq!(image.get(0, 0), FALLBACK);
        assert_eq!(image.get(8, 0), FALLBACK);
    }

    #[test]
    fn test_parallel_render_matches_serial() {
        let scene = one_sphere_scene();
        let camera = Camera::look_at(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, -5.0)).unwrap();
        let background = Background::new(FALLBACK);
        let ctx = TraceContext::new(&scene, &camera, &background);
        let settings = RenderSettings::default();

        let image = render(&ctx, 16, 12, &settings);
        for (index, color) in image.pixels.iter().enumerate() {
            assert_eq!(*color, render_pixel(&ctx, index, 16, 12, &settings));
        }
    }

    #[test]
    fn test_depth_of_field_is_deterministic_per_seed() {
        let scene = one_sphere_scene();
        let camera = Camera::look_at(Vec3::ZERO, Vec3::NEG_Z)
            .unwrap()
            .with_lens(1.0, 0.3, 3.0);
        let background = Background::new(FALLBACK);
        let ctx = TraceContext::new(&scene, &camera, &background);
        let settings = RenderSettings::default().with_samples(4).with_seed(11);

        let a = render(&ctx, 12, 12, &settings);
        let b = render(&ctx, 12, 12, &settings);
        assert_eq!(a, b);

        let other_seed = render(&ctx, 12, 12, &settings.clone().with_seed(12));
        assert_ne!(a, other_seed);
    }

    #[test]
    fn test_render_depth_comes_from_settings() {
        // Mirror sphere in front of a floor: reflections only show past depth 0
        let scene = Scene::new(
            vec![Sphere::new(Vec3::new(0.0, -1.0, -15.0), 3.0, MIRROR)],
            vec![Vec3::new(10.0, 10.0, 10.0)],
        );
        let camera = Camera::look_at(Vec3::ZERO, Vec3::new(0.0, -1.0, -15.0)).unwrap();
        let background = Background::new(FALLBACK);
        let ctx = TraceContext::new(&scene, &camera, &background).with_max_depth(100);

        let shallow = render(&ctx, 8, 8, &RenderSettings::default().with_max_depth(0));
        let deep = render(&ctx, 8, 8, &RenderSettings::default().with_max_depth(100));
        assert_ne!(shallow, deep);

        let shallow_ctx = TraceContext::new(&scene, &camera, &background).with_max_depth(0);
        let settings = RenderSettings::default().with_max_depth(0);
        assert_eq!(render(&shallow_ctx, 8, 8, &settings), shallow);
    }

    #[test]
    fn test_context_depth_is_capped() {
        let scene = one_sphere_scene();
        let camera = Camera::look_at(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let background = Background::new(FALLBACK);

        let ctx = TraceContext::new(&scene, &camera, &background);
        assert_eq!(ctx.max_depth(), 4);
        assert_eq!(ctx.with_max_depth(500).max_depth(), MAX_DEPTH_LIMIT);
    }

    #[test]
    fn test_pixel_streams_differ() {
        use rand::Rng;

        let a: u64 = pixel_rng(0, 0).gen();
        let b: u64 = pixel_rng(0, 1).gen();
        let c: u64 = pixel_rng(1, 0).gen();
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
