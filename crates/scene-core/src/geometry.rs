//! Geometry descriptions in the viewer's JSON layout

use std::collections::BTreeMap;

use serde::Serialize;

/// Segment counts used by the viewer for curved primitives
pub const SPHERE_SEGMENTS: u32 = 20;
pub const CYLINDER_RADIAL_SEGMENTS: u32 = 50;

/// Scene geometry, tagged by its three.js type name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    #[serde(rename = "BoxGeometry")]
    Box { width: f32, height: f32, depth: f32 },

    #[serde(rename = "SphereGeometry", rename_all = "camelCase")]
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },

    /// Cylinder aligned with the local Y axis
    #[serde(rename = "CylinderGeometry", rename_all = "camelCase")]
    Cylinder {
        height: f32,
        radius_top: f32,
        radius_bottom: f32,
        radial_segments: u32,
    },

    #[serde(rename = "BufferGeometry")]
    Buffer { data: BufferData },

    /// Raw mesh file decoded by the viewer
    #[serde(rename = "_meshfile_geometry")]
    MeshFile {
        format: MeshFormat,
        data: MeshData,
        resources: BTreeMap<String, String>,
    },
}

impl Geometry {
    pub fn sphere(radius: f32) -> Self {
        Geometry::Sphere {
            radius,
            width_segments: SPHERE_SEGMENTS,
            height_segments: SPHERE_SEGMENTS,
        }
    }

    pub fn cylinder(length: f32, radius: f32) -> Self {
        Geometry::Cylinder {
            height: length,
            radius_top: radius,
            radius_bottom: radius,
            radial_segments: CYLINDER_RADIAL_SEGMENTS,
        }
    }

    /// Box with X/Y/Z extents
    pub fn cuboid(dims: [f32; 3]) -> Self {
        Geometry::Box {
            width: dims[0],
            height: dims[1],
            depth: dims[2],
        }
    }

    /// Point set with optional per-vertex colors
    pub fn points(positions: &[[f32; 3]], colors: Option<&[[f32; 3]]>) -> Self {
        Geometry::Buffer {
            data: BufferData {
                attributes: BufferAttributes {
                    position: BufferAttribute::from_vec3(positions),
                    color: colors.map(BufferAttribute::from_vec3),
                },
            },
        }
    }

    pub fn mesh_file(format: MeshFormat, data: MeshData) -> Self {
        Geometry::MeshFile {
            format,
            data,
            resources: BTreeMap::new(),
        }
    }

    /// Vertex positions of a buffer geometry
    pub fn positions(&self) -> Option<Vec<[f32; 3]>> {
        match self {
            Geometry::Buffer { data } => Some(data.attributes.position.to_vec3()),
            _ => None,
        }
    }

    /// Vertex colors of a buffer geometry
    pub fn colors(&self) -> Option<Vec<[f32; 3]>> {
        match self {
            Geometry::Buffer { data } => data.attributes.color.as_ref().map(|c| c.to_vec3()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BufferData {
    pub attributes: BufferAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BufferAttributes {
    pub position: BufferAttribute,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<BufferAttribute>,
}

/// Flat typed array with a fixed item size
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferAttribute {
    pub item_size: u32,
    #[serde(rename = "type")]
    pub array_type: String,
    pub array: Vec<f32>,
    pub normalized: bool,
}

impl BufferAttribute {
    pub fn from_vec3(values: &[[f32; 3]]) -> Self {
        Self {
            item_size: 3,
            array_type: "Float32Array".to_string(),
            array: values.iter().flatten().copied().collect(),
            normalized: false,
        }
    }

    pub fn to_vec3(&self) -> Vec<[f32; 3]> {
        self.array
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect()
    }
}

/// Mesh file formats the viewer can decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshFormat {
    Stl,
    Obj,
    Dae,
}

impl MeshFormat {
    /// Detect format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "stl" => Some(MeshFormat::Stl),
            "obj" => Some(MeshFormat::Obj),
            "dae" => Some(MeshFormat::Dae),
            _ => None,
        }
    }

    /// Binary formats are sent as raw bytes, the others as text
    pub fn is_binary(&self) -> bool {
        matches!(self, MeshFormat::Stl)
    }
}

/// Mesh file payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MeshData {
    Binary(#[serde(with = "serde_bytes")] Vec<u8>),
    Text(String),
}
