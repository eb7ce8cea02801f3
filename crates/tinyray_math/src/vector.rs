//! Checked vector normalization.
//!
//! `glam` returns NaN components when normalizing a zero vector. Anything that
//! builds a direction from user data (camera basis, light directions) goes
//! through [`Vec3Ext::unit`] instead so the failure is reported, not
//! propagated into the image.

use glam::Vec3;
use thiserror::Error;

/// Returned when a vector cannot be scaled to unit length.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("cannot normalize degenerate vector ({x}, {y}, {z})")]
pub struct DegenerateVectorError {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for DegenerateVectorError {
    fn from(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

/// Extra vector operations used across the renderer.
pub trait Vec3Ext {
    /// `v / |v|`, or an error if `v` has zero or non-finite length.
    fn unit(self) -> Result<Vec3, DegenerateVectorError>;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn unit(self) -> Result<Vec3, DegenerateVectorError> {
        self.try_normalize().ok_or_else(|| self.into())
    }
}
