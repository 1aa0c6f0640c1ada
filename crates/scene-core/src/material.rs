//! Materials and color-spec resolution

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::color::{BLACK, COLORMAP, named_color, rgb_to_int};

/// three.js material type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MaterialKind {
    #[default]
    MeshPhongMaterial,
    MeshLambertMaterial,
    MeshBasicMaterial,
    LineBasicMaterial,
}

/// Renderable material description, serialized in the viewer's JSON layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(rename = "type")]
    pub kind: MaterialKind,
    /// Packed 0xRRGGBB
    pub color: u32,
    pub transparent: bool,
    pub opacity: f32,
    pub reflectivity: f32,
    /// 0 = front, 1 = back, 2 = double sided
    pub side: u32,
    pub linewidth: f32,
    pub wireframe: bool,
    pub vertex_colors: bool,
}

impl Material {
    /// Opaque Phong material with the given packed color
    pub const fn phong(color: u32) -> Self {
        Self {
            kind: MaterialKind::MeshPhongMaterial,
            color,
            transparent: false,
            opacity: 1.0,
            reflectivity: 0.5,
            side: 2,
            linewidth: 1.0,
            wireframe: false,
            vertex_colors: false,
        }
    }

    /// Line material taking its colors from the geometry's color attribute
    pub const fn line_vertex_colors(linewidth: f32) -> Self {
        Self {
            kind: MaterialKind::LineBasicMaterial,
            color: 0xffffff,
            transparent: false,
            opacity: 1.0,
            reflectivity: 0.5,
            side: 2,
            linewidth,
            wireframe: false,
            vertex_colors: true,
        }
    }

    /// Phong material from float RGB(A) in [0, 1]
    pub fn from_rgba(rgba: [f32; 4]) -> Self {
        let mut material = Self::phong(rgb_to_int(rgba[0], rgba[1], rgba[2]));
        material.transparent = rgba[3] < 1.0;
        material.opacity = rgba[3];
        material
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::phong(0xffffff)
    }
}

/// Caller-supplied color description, resolved by [`resolve_material`]
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ColorSpec {
    /// Pre-built material, used unchanged
    Material(Material),
    /// Name in the color table
    Named(String),
    /// RGB or RGBA floats in [0, 1]
    Rgba(Vec<f32>),
    /// No color given: pick one from the color table
    #[default]
    Random,
}

impl From<Material> for ColorSpec {
    fn from(material: Material) -> Self {
        ColorSpec::Material(material)
    }
}

impl From<&str> for ColorSpec {
    fn from(name: &str) -> Self {
        ColorSpec::Named(name.to_string())
    }
}

impl From<String> for ColorSpec {
    fn from(name: String) -> Self {
        ColorSpec::Named(name)
    }
}

impl From<[f32; 3]> for ColorSpec {
    fn from(rgb: [f32; 3]) -> Self {
        ColorSpec::Rgba(rgb.to_vec())
    }
}

impl From<[f32; 4]> for ColorSpec {
    fn from(rgba: [f32; 4]) -> Self {
        ColorSpec::Rgba(rgba.to_vec())
    }
}

impl From<Vec<f32>> for ColorSpec {
    fn from(values: Vec<f32>) -> Self {
        ColorSpec::Rgba(values)
    }
}

impl<T: Into<ColorSpec>> From<Option<T>> for ColorSpec {
    fn from(spec: Option<T>) -> Self {
        spec.map(Into::into).unwrap_or(ColorSpec::Random)
    }
}

/// Resolve a color spec to a material using the thread-local RNG
pub fn resolve_material(spec: &ColorSpec) -> Material {
    resolve_material_with_rng(spec, &mut rand::thread_rng())
}

/// Resolve a color spec to a material
///
/// Never fails: names missing from the table and lists that are neither RGB
/// nor RGBA resolve to black, with a warning.
pub fn resolve_material_with_rng<R: Rng + ?Sized>(spec: &ColorSpec, rng: &mut R) -> Material {
    match spec {
        ColorSpec::Material(material) => *material,
        ColorSpec::Named(name) => named_color(name).unwrap_or_else(|| {
            tracing::warn!("Unknown color name '{}', falling back to black", name);
            BLACK
        }),
        ColorSpec::Rgba(values) => match values.as_slice() {
            [r, g, b] => Material::phong(rgb_to_int(*r, *g, *b)),
            [r, g, b, a] => Material::from_rgba([*r, *g, *b, *a]),
            _ => {
                tracing::warn!(
                    "Color list must have 3 or 4 components, got {}; falling back to black",
                    values.len()
                );
                BLACK
            }
        },
        ColorSpec::Random => COLORMAP
            .choose(rng)
            .map(|(_, material)| *material)
            .unwrap_or(BLACK),
    }
}
