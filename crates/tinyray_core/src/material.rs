//! Surface materials and the named preset catalog.

use std::collections::HashMap;

use tinyray_math::{Color, Vec3};

/// Optical response of a surface.
///
/// `albedo` weights the four shading terms `[diffuse, specular, reflection,
/// refraction]`. The weights are not normalized and need not sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Index of refraction (1.0 = air)
    pub refractive_index: f32,
    pub albedo: [f32; 4],
    pub diffuse_color: Color,
    pub specular_exponent: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            refractive_index: 1.0,
            albedo: [1.0, 0.0, 0.0, 0.0],
            diffuse_color: Color::ZERO,
            specular_exponent: 0.0,
        }
    }
}

impl Material {
    pub const fn new(
        refractive_index: f32,
        albedo: [f32; 4],
        diffuse_color: Color,
        specular_exponent: f32,
    ) -> Self {
        Self {
            refractive_index,
            albedo,
            diffuse_color,
            specular_exponent,
        }
    }

    /// Same material with a different diffuse color.
    pub fn with_diffuse_color(self, diffuse_color: Color) -> Self {
        Self {
            diffuse_color,
            ..self
        }
    }

    #[inline]
    pub fn diffuse_weight(&self) -> f32 {
        self.albedo[0]
    }

    #[inline]
    pub fn specular_weight(&self) -> f32 {
        self.albedo[1]
    }

    #[inline]
    pub fn reflection_weight(&self) -> f32 {
        self.albedo[2]
    }

    #[inline]
    pub fn refraction_weight(&self) -> f32 {
        self.albedo[3]
    }
}

pub const IVORY: Material = Material::new(
    1.0,
    [0.9, 0.5, 0.1, 0.0],
    Vec3::new(0.4, 0.4, 0.3),
    50.0,
);

pub const GLASS: Material = Material::new(
    1.5,
    [0.0, 0.9, 0.1, 0.8],
    Vec3::new(0.6, 0.7, 0.8),
    125.0,
);

pub const RED_RUBBER: Material = Material::new(
    1.0,
    [1.4, 0.3, 0.0, 0.0],
    Vec3::new(0.3, 0.1, 0.1),
    10.0,
);

pub const MIRROR: Material = Material::new(
    1.0,
    [0.0, 16.0, 0.8, 0.0],
    Vec3::new(1.0, 1.0, 1.0),
    1425.0,
);

pub const GOLD: Material = Material::new(
    1.0,
    [0.5, 0.8, 0.3, 0.0],
    Vec3::new(1.0, 0.843, 0.0),
    300.0,
);

pub const EMERALD: Material = Material::new(
    1.3,
    [0.1, 0.3, 0.0, 0.6],
    Vec3::new(0.314, 0.784, 0.471),
    75.0,
);

pub const STEEL: Material = Material::new(
    1.0,
    [0.2, 1.0, 0.5, 0.0],
    Vec3::new(0.6, 0.6, 0.7),
    800.0,
);

pub const ICE: Material = Material::new(
    1.31,
    [0.1, 0.3, 0.1, 0.9],
    Vec3::new(0.9, 0.95, 1.0),
    250.0,
);

/// Name used when a scene references a material that does not exist.
pub const FALLBACK_MATERIAL: &str = "mirror";

/// Lookup table from preset name to material.
///
/// Built once at startup; scene objects copy the material they reference.
#[derive(Debug, Clone)]
pub struct MaterialCatalog {
    materials: HashMap<String, Material>,
}

impl MaterialCatalog {
    /// Create a catalog holding the built-in presets.
    pub fn new() -> Self {
        let materials = [
            ("ivory", IVORY),
            ("glass", GLASS),
            ("mirror", MIRROR),
            ("red_rubber", RED_RUBBER),
            ("gold", GOLD),
            ("emerald", EMERALD),
            ("steel", STEEL),
            ("ice", ICE),
        ]
        .into_iter()
        .map(|(name, material)| (name.to_string(), material))
        .collect();

        Self { materials }
    }

    /// Get a preset by exact name.
    pub fn get(&self, name: &str) -> Option<Material> {
        self.materials.get(name).copied()
    }

    /// Get a preset by name, substituting the mirror preset for unknown names.
    pub fn lookup(&self, name: &str) -> Material {
        self.get(name).unwrap_or_else(|| {
            log::warn!(
                "Unknown material '{}', using '{}'",
                name,
                FALLBACK_MATERIAL
            );
            MIRROR
        })
    }

    /// Iterate over preset names (unordered).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::new()
    }
}
