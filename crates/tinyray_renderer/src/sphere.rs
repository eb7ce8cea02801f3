//! Sphere primitive for ray tracing.

use tinyray_core::{Material, MaterialCatalog, SphereDescription};
use tinyray_math::{Ray, Vec3};

use crate::hittable::EPSILON;

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    /// Build a sphere from its scene-file entry, resolving the material name.
    pub fn from_description(desc: &SphereDescription, catalog: &MaterialCatalog) -> Self {
        Self::new(
            Vec3::from_array(desc.center),
            desc.radius,
            catalog.lookup(&desc.material),
        )
    }

    /// Distance to the nearest intersection beyond [`EPSILON`], if any.
    ///
    /// `ray.direction` must be unit length.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let to_center = self.center - ray.origin;
        // Closest approach along the ray
        let tca = to_center.dot(ray.direction);
        let d2 = to_center.dot(to_center) - tca * tca;
        let r2 = self.radius * self.radius;

        if d2 > r2 {
            return None;
        }

        let thc = (r2 - d2).sqrt();
        let t0 = tca - thc;
        let t1 = tca + thc;

        if t0 > EPSILON {
            Some(t0)
        } else if t1 > EPSILON {
            Some(t1)
        } else {
            None
        }
    }

    /// Outward unit normal at a point on the surface.
    #[inline]
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }
}
