//! Background color for rays that leave the scene.
//!
//! Either a flat color or an equirectangular environment image. The flat
//! color is always kept: it is returned when no image is loaded and when
//! recursion runs out of depth.

use std::f32::consts::{PI, TAU};

use tinyray_core::{BackgroundDescription, EnvironmentImage, EnvironmentMapping};
use tinyray_math::{Color, Interval, Vec3};

use crate::camera::Camera;

/// Horizontal shift applied to the azimuth so that the view direction of a
/// camera-relative lookup lands in the middle of the image.
const AZIMUTH_SHIFT: f32 = 0.25;

const UNIT_RANGE: Interval = Interval::new(-1.0, 1.0);

#[derive(Debug, Clone)]
pub struct Background {
    fallback: Color,
    image: Option<EnvironmentImage>,
    mapping: EnvironmentMapping,
}

impl Background {
    /// A flat-color background.
    pub fn new(fallback: Color) -> Self {
        Self {
            fallback,
            image: None,
            mapping: EnvironmentMapping::default(),
        }
    }

    /// Build the background described by a scene file, loading its image.
    pub fn from_description(desc: &BackgroundDescription) -> Self {
        let background = Self::new(desc.fallback_color()).with_mapping(desc.mapping);
        match desc.load_environment() {
            Some(image) => background.with_image(image),
            None => background,
        }
    }

    pub fn with_image(mut self, image: EnvironmentImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_mapping(mut self, mapping: EnvironmentMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// The flat color.
    pub fn fallback(&self) -> Color {
        self.fallback
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn mapping(&self) -> EnvironmentMapping {
        self.mapping
    }

    /// Color seen along a unit `direction` that hit nothing.
    ///
    /// With [`EnvironmentMapping::Camera`] the direction is first expressed
    /// in the camera basis, so the environment turns with the camera.
    pub fn sample(&self, direction: Vec3, camera: &Camera) -> Color {
        match self.mapping {
            EnvironmentMapping::Camera if self.image.is_some() => {
                self.lookup(camera.to_camera_space(direction))
            }
            _ => self.lookup(direction),
        }
    }

    /// Equirectangular lookup of a unit direction, with no basis change.
    pub fn lookup(&self, direction: Vec3) -> Color {
        let Some(image) = &self.image else {
            return self.fallback;
        };

        let (u, v) = direction_to_uv(direction);
        let x = ((u * image.width() as f32) as u32).min(image.width() - 1);
        let y = ((v * image.height() as f32) as u32).min(image.height() - 1);

        image.pixel(x, y)
    }
}

/// Map a unit direction to texture coordinates in `[0, 1)`.
///
/// `u` follows the azimuth around +Y (shifted by a quarter turn), `v` the
/// polar angle from +Y, so `v = 0` is straight up.
fn direction_to_uv(d: Vec3) -> (f32, f32) {
    let phi = (-d.z).atan2(d.x);
    let theta = UNIT_RANGE.clamp(d.y).acos();

    let u = ((phi + PI) / TAU + AZIMUTH_SHIFT).rem_euclid(1.0);
    let v = theta / PI;
    (u, v)
}
