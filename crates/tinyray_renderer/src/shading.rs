//! Recursive Whitted-style shading.
//!
//! Each hit combines four terms weighted by the material albedo: diffuse and
//! specular direct lighting from point lights with hard shadows, plus the
//! colors of a recursively traced reflection ray and refraction ray.

use tinyray_core::{DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
use tinyray_math::{Color, Ray, Vec3, Vec3Ext};

use crate::background::Background;
use crate::camera::Camera;
use crate::hittable::Hit;
use crate::scene::Scene;

/// Mirror `incident` about the plane with unit normal `normal`.
#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - normal * 2.0 * incident.dot(normal)
}

/// Refract a unit `incident` direction through a surface with unit `normal`
/// by Snell's law.
///
/// `eta_t` is the index on the far side of the surface and `eta_i` the index
/// on the incident side. When the ray arrives from behind the normal the
/// indices swap. Returns `None` on total internal reflection.
pub fn refract(incident: Vec3, normal: Vec3, eta_t: f32, eta_i: f32) -> Option<Vec3> {
    let cos_i = -incident.dot(normal).clamp(-1.0, 1.0);
    if cos_i < 0.0 {
        // Leaving the object
        return refract(incident, -normal, eta_i, eta_t);
    }

    let eta = eta_i / eta_t;
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }

    Some(incident * eta + normal * (eta * cos_i - k.sqrt()))
}

/// Read-only state shared by every ray of a render.
#[derive(Debug, Clone, Copy)]
pub struct TraceContext<'a> {
    pub scene: &'a Scene,
    pub camera: &'a Camera,
    pub background: &'a Background,
    /// Deepest recursion level that is still shaded
    max_depth: u32,
}

impl<'a> TraceContext<'a> {
    /// Context shading up to [`DEFAULT_MAX_DEPTH`] bounces.
    pub fn new(scene: &'a Scene, camera: &'a Camera, background: &'a Background) -> Self {
        Self {
            scene,
            camera,
            background,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the recursion limit, capped at [`MAX_DEPTH_LIMIT`].
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        self
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Color seen along `ray` (unit direction) at recursion level `depth`.
    ///
    /// Past `max_depth` the flat background color is returned without
    /// tracing. Primary rays start at depth 0.
    pub fn cast_ray(&self, ray: &Ray, depth: u32) -> Color {
        if depth > self.max_depth {
            return self.background.fallback();
        }

        let Some(hit) = self.scene.intersect(ray) else {
            return self.background.sample(ray.direction, self.camera);
        };
        let material = &hit.material;

        // Zero-weight branches contribute nothing; skip their subtrees.
        let reflect_color = if material.reflection_weight() != 0.0 {
            let reflect_dir = reflect(ray.direction, hit.normal).normalize();
            self.cast_ray(&Ray::new(hit.point, reflect_dir), depth + 1)
        } else {
            Color::ZERO
        };

        let refract_color = if material.refraction_weight() != 0.0 {
            refract(ray.direction, hit.normal, material.refractive_index, 1.0)
                .map(|dir| self.cast_ray(&Ray::new(hit.point, dir.normalize()), depth + 1))
                .unwrap_or(Color::ZERO)
        } else {
            Color::ZERO
        };

        let (diffuse, specular) = self.direct_lighting(ray, &hit);

        material.diffuse_color * diffuse * material.diffuse_weight()
            + Color::ONE * specular * material.specular_weight()
            + reflect_color * material.reflection_weight()
            + refract_color * material.refraction_weight()
    }

    /// Summed diffuse and specular intensities from all unoccluded lights.
    fn direct_lighting(&self, ray: &Ray, hit: &Hit) -> (f32, f32) {
        let mut diffuse = 0.0;
        let mut specular = 0.0;

        for &light in self.scene.lights() {
            let to_light = light - hit.point;
            // A light sitting on the surface has no direction
            let Ok(light_dir) = to_light.unit() else {
                continue;
            };

            if self.is_occluded(hit.point, light_dir, to_light.length()) {
                continue;
            }

            diffuse += light_dir.dot(hit.normal).max(0.0);
            specular += (-reflect(-light_dir, hit.normal))
                .dot(ray.direction)
                .max(0.0)
                .powf(hit.material.specular_exponent);
        }

        (diffuse, specular)
    }

    /// True if any geometry lies between `point` and a light `light_distance`
    /// away along `light_dir`.
    fn is_occluded(&self, point: Vec3, light_dir: Vec3, light_distance: f32) -> bool {
        self.scene
            .intersect(&Ray::new(point, light_dir))
            .is_some_and(|shadow| (shadow.point - point).length() < light_distance)
    }
}
