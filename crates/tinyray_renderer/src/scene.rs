//! Scene contents and nearest-hit search.
//!
//! Besides the loaded spheres, every scene has a fixed checkerboard floor:
//! the plane `y = -4` restricted to `x in (-10, 10)`, `z in (-30, -10)`.

use tinyray_core::{Material, MaterialCatalog, SceneDescription};
use tinyray_math::{Color, Interval, Ray, Vec3};

use crate::hittable::{Hit, EPSILON, HORIZON};
use crate::sphere::Sphere;

const FLOOR_HEIGHT: f32 = -4.0;
const FLOOR_X: Interval = Interval::new(-10.0, 10.0);
const FLOOR_Z: Interval = Interval::new(-30.0, -10.0);

/// Floor cell color where the checker parity is odd.
pub const CHECKER_ODD: Color = Color::new(0.3, 0.2, 0.1);
/// Floor cell color where the checker parity is even.
pub const CHECKER_EVEN: Color = Color::new(0.3, 0.3, 0.3);

/// Checkerboard color of the floor at `(x, z)`.
///
/// Cells are two units wide. The `+1000` keeps the x term positive so the
/// pattern has no seam at `x = 0`.
pub fn checker_color(x: f32, z: f32) -> Color {
    let parity = (0.5 * x + 1000.0).floor() as i64 + (0.5 * z).floor() as i64;
    if parity.rem_euclid(2) == 1 {
        CHECKER_ODD
    } else {
        CHECKER_EVEN
    }
}

/// Spheres and point lights. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    spheres: Vec<Sphere>,
    lights: Vec<Vec3>,
}

impl Scene {
    pub fn new(spheres: Vec<Sphere>, lights: Vec<Vec3>) -> Self {
        Self { spheres, lights }
    }

    /// Build the scene objects from a scene file.
    pub fn from_description(desc: &SceneDescription, catalog: &MaterialCatalog) -> Self {
        let spheres = desc
            .spheres
            .iter()
            .map(|s| Sphere::from_description(s, catalog))
            .collect();
        let lights = desc.lights.iter().copied().map(Vec3::from_array).collect();

        Self::new(spheres, lights)
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn lights(&self) -> &[Vec3] {
        &self.lights
    }

    /// Find the nearest hit among the floor and all spheres.
    ///
    /// `ray.direction` must be unit length. Hits beyond [`HORIZON`] count as
    /// misses.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let mut nearest: Option<Hit> = None;

        if let Some(distance) = floor_distance(ray) {
            let point = ray.at(distance);
            nearest = Some(Hit {
                point,
                normal: Vec3::Y,
                material: Material::default().with_diffuse_color(checker_color(point.x, point.z)),
                distance,
            });
        }

        for sphere in &self.spheres {
            let Some(distance) = sphere.intersect(ray) else {
                continue;
            };
            if nearest.is_some_and(|hit| hit.distance <= distance) {
                continue;
            }

            let point = ray.at(distance);
            nearest = Some(Hit {
                point,
                normal: sphere.normal_at(point),
                material: sphere.material,
                distance,
            });
        }

        nearest.filter(|hit| hit.distance < HORIZON)
    }
}

/// Distance to the floor rectangle, if the ray hits it.
fn floor_distance(ray: &Ray) -> Option<f32> {
    // Near-parallel rays never reach the floor in a useful distance
    if ray.direction.y.abs() <= EPSILON {
        return None;
    }

    let t = -(ray.origin.y - FLOOR_HEIGHT) / ray.direction.y;
    if t <= EPSILON {
        return None;
    }

    let p = ray.at(t);
    (FLOOR_X.surrounds(p.x) && FLOOR_Z.surrounds(p.z)).then_some(t)
}
