//! tinyray renderer - CPU Whitted-style ray tracing
//!
//! Renders analytic spheres over a checkerboard floor, lit by point lights.
//! Each hit is shaded with diffuse and specular direct lighting plus
//! recursively traced reflection and refraction rays.

mod background;
mod camera;
mod hittable;
mod renderer;
mod scene;
mod shading;
mod sphere;
mod world;

pub use background::Background;
pub use camera::Camera;
pub use hittable::{Hit, EPSILON, HORIZON};
pub use renderer::{color_to_rgb8, render, render_pixel, ImageBuffer};
pub use scene::{checker_color, Scene, CHECKER_EVEN, CHECKER_ODD};
pub use shading::{reflect, refract, TraceContext};
pub use sphere::Sphere;
pub use world::World;

/// Re-export Vec3 and common math types from tinyray_math
pub use tinyray_math::{Color, Ray, Vec3};

use rand::{Rng, RngCore};

/// Uniform sample in [0, 1).
#[inline]
pub(crate) fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}
