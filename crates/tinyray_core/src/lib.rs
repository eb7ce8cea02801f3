//! tinyray core - materials, scene files and render settings.
//!
//! This crate provides:
//!
//! - **Materials**: the `Material` type and the named preset catalog
//! - **Scene files**: JSON scene descriptions and validation
//! - **Environment images**: equirectangular background loading
//!
//! # Example
//!
//! ```ignore
//! use tinyray_core::{MaterialCatalog, SceneDescription};
//!
//! let scene = SceneDescription::load("scene.json")?;
//! let catalog = MaterialCatalog::new();
//! for sphere in &scene.spheres {
//!     let material = catalog.lookup(&sphere.material);
//! }
//! ```

pub mod material;
pub mod scene;
pub mod settings;
pub mod texture;

// Re-export commonly used types
pub use material::{Material, MaterialCatalog};
pub use scene::{
    BackgroundDescription, BackgroundKind, CameraDescription, EnvironmentMapping, SceneDescription,
    SceneError, SceneResult, SphereDescription,
};
pub use settings::{
    parse_max_depth, RenderSettings, SettingsError, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT,
};
pub use texture::{EnvironmentImage, TextureError, TextureResult};
