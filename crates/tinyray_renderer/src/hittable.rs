//! Ray-surface intersection results.

use tinyray_core::Material;
use tinyray_math::Vec3;

/// Minimum accepted hit distance. Rays spawned on a surface start exactly on
/// it, so anything closer than this is treated as self-intersection.
pub const EPSILON: f32 = 0.001;

/// Hits farther than this are treated as misses.
pub const HORIZON: f32 = 1000.0;

/// Record of the nearest ray-scene intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Point of intersection
    pub point: Vec3,
    /// Outward unit surface normal (not flipped toward the ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: Material,
    /// Distance along the ray
    pub distance: f32,
}
