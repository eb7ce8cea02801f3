//! Everything a render reads, built from a scene file.

use tinyray_core::{MaterialCatalog, SceneDescription};
use tinyray_math::DegenerateVectorError;

use crate::background::Background;
use crate::camera::Camera;
use crate::scene::Scene;
use crate::shading::TraceContext;

/// Scene, camera and background for one render, plus the image size.
#[derive(Debug, Clone)]
pub struct World {
    pub scene: Scene,
    pub camera: Camera,
    pub background: Background,
    pub width: u32,
    pub height: u32,
}

impl World {
    /// Build the render inputs for a validated scene description.
    ///
    /// Loads the environment image if one is configured; a failed load
    /// leaves the flat background color in place.
    pub fn from_description(
        desc: &SceneDescription,
        catalog: &MaterialCatalog,
    ) -> Result<Self, DegenerateVectorError> {
        let camera = Camera::from_description(&desc.camera, desc.fov)?;
        let scene = Scene::from_description(desc, catalog);
        let background = Background::from_description(&desc.background);

        log::debug!(
            "Camera at {:?}, forward {:?}, background image: {}",
            camera.position(),
            camera.forward(),
            background.has_image()
        );

        Ok(Self {
            scene,
            camera,
            background,
            width: desc.width,
            height: desc.height,
        })
    }

    /// Shading context borrowing this world.
    pub fn context(&self) -> TraceContext<'_> {
        TraceContext::new(&self.scene, &self.camera, &self.background)
    }
}
