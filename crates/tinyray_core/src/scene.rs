//! Scene description file format.
//!
//! A scene is a JSON document listing image size, field of view, camera,
//! background, point lights and spheres. Spheres reference materials from
//! the [`MaterialCatalog`](crate::MaterialCatalog) by name.

use std::f32::consts::PI;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tinyray_math::{Color, Vec3};

use crate::texture::EnvironmentImage;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    Invalid(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Background color used when the scene does not specify one.
pub const DEFAULT_BACKGROUND: [f32; 3] = [0.2, 0.7, 0.8];

/// How environment image lookups are oriented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentMapping {
    /// Directions are expressed in the camera basis before lookup, so the
    /// environment turns with the camera.
    #[default]
    Camera,
    /// Directions are used as-is; the environment is fixed to the world.
    World,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    #[default]
    Color,
    Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    pub position: [f32; 3],
    pub look_at: [f32; 3],
    /// Lens radius; 0 is a pinhole camera
    pub aperture: f32,
    /// Distance from the camera to the plane of perfect focus
    pub focus_distance: f32,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, -1.0],
            aperture: 0.0,
            focus_distance: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundDescription {
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    /// Environment image path (only read when `kind` is `image`)
    pub path: Option<PathBuf>,
    /// Flat color, also used when the image cannot be loaded
    #[serde(rename = "default")]
    pub fallback: [f32; 3],
    pub mapping: EnvironmentMapping,
}

impl Default for BackgroundDescription {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Color,
            path: None,
            fallback: DEFAULT_BACKGROUND,
            mapping: EnvironmentMapping::default(),
        }
    }
}

impl BackgroundDescription {
    pub fn fallback_color(&self) -> Color {
        Color::from_array(self.fallback)
    }

    /// Load the environment image, if one is configured.
    ///
    /// A failed load is not fatal: it is logged and `None` is returned so the
    /// render continues with the fallback color.
    pub fn load_environment(&self) -> Option<EnvironmentImage> {
        if self.kind != BackgroundKind::Image {
            return None;
        }

        let Some(path) = &self.path else {
            log::warn!("Image background has no path, using fallback color");
            return None;
        };

        match EnvironmentImage::load(path) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("Failed to load envmap, fallback to color: {}", e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: [f32; 3],
    pub radius: f32,
    pub material: String,
}

/// Top-level scene file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub width: u32,
    pub height: u32,
    /// Field of view in radians
    pub fov: f32,
    #[serde(default)]
    pub camera: CameraDescription,
    #[serde(default)]
    pub background: BackgroundDescription,
    #[serde(default)]
    pub lights: Vec<[f32; 3]>,
    #[serde(default)]
    pub spheres: Vec<SphereDescription>,
}

impl SceneDescription {
    /// Load and validate a scene file.
    ///
    /// A relative environment image path is resolved against the directory
    /// containing the scene file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut scene = Self::from_json(&contents)?;

        if let (Some(image_path), Some(base)) = (&scene.background.path, path.parent()) {
            if image_path.is_relative() {
                scene.background.path = Some(base.join(image_path));
            }
        }

        log::info!(
            "Loaded scene {}: {}x{}, {} spheres, {} lights",
            path.display(),
            scene.width,
            scene.height,
            scene.spheres.len(),
            scene.lights.len()
        );

        Ok(scene)
    }

    /// Parse and validate a scene from a JSON string.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        let scene: Self = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Check the ranges the renderer relies on.
    pub fn validate(&self) -> SceneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid(format!(
                "image size must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        if !(self.fov > 0.0 && self.fov < PI) {
            return Err(invalid(format!(
                "fov must be in (0, pi) radians, got {}",
                self.fov
            )));
        }

        let camera = &self.camera;
        if !(camera.aperture >= 0.0 && camera.aperture.is_finite()) {
            return Err(invalid(format!(
                "camera aperture must be >= 0, got {}",
                camera.aperture
            )));
        }
        if !(camera.focus_distance > 0.0 && camera.focus_distance.is_finite()) {
            return Err(invalid(format!(
                "camera focus_distance must be > 0, got {}",
                camera.focus_distance
            )));
        }
        if camera.position == camera.look_at {
            return Err(invalid("camera position and look_at coincide".to_string()));
        }

        for (i, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius > 0.0 && sphere.radius.is_finite()) {
                return Err(invalid(format!(
                    "sphere {} radius must be > 0, got {}",
                    i, sphere.radius
                )));
            }
            if !Vec3::from_array(sphere.center).is_finite() {
                return Err(invalid(format!("sphere {} center is not finite", i)));
            }
        }

        for (i, light) in self.lights.iter().enumerate() {
            if !Vec3::from_array(*light).is_finite() {
                return Err(invalid(format!("light {} position is not finite", i)));
            }
        }

        Ok(())
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

fn invalid(message: String) -> SceneError {
    SceneError::Invalid(message)
}
