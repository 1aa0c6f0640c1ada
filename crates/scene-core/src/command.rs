//! Node-addressed scene commands and their msgpack encoding

use glam::Mat4;
use serde::Serialize;
use uuid::Uuid;

use crate::geometry::Geometry;
use crate::material::{Material, MaterialKind};

/// three.js object format version
pub const OBJECT_FORMAT_VERSION: f32 = 4.5;

/// Errors while encoding a command for the wire
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("MsgPack error: {0}")]
    MsgPack(#[from] rmp_serde::encode::Error),
}

/// three.js object type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectKind {
    Mesh,
    LineSegments,
    Points,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectMetadata {
    pub version: f32,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for ObjectMetadata {
    fn default() -> Self {
        Self {
            version: OBJECT_FORMAT_VERSION,
            kind: "Object".to_string(),
        }
    }
}

/// Geometry with the uuid the object refers to it by
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryEntry {
    pub uuid: String,
    #[serde(flatten)]
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialEntry {
    pub uuid: String,
    #[serde(flatten)]
    pub material: Material,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectNode {
    pub uuid: String,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub geometry: String,
    pub material: String,
    /// Column-major local matrix
    pub matrix: [f32; 16],
}

/// Object payload of a `set_object` command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectData {
    pub metadata: ObjectMetadata,
    pub geometries: Vec<GeometryEntry>,
    pub materials: Vec<MaterialEntry>,
    pub object: ObjectNode,
}

impl ObjectData {
    /// Wrap a geometry and material; line materials produce line segments
    pub fn new(geometry: Geometry, material: Material) -> Self {
        let kind = match material.kind {
            MaterialKind::LineBasicMaterial => ObjectKind::LineSegments,
            _ => ObjectKind::Mesh,
        };
        Self::with_kind(kind, geometry, material)
    }

    pub fn with_kind(kind: ObjectKind, geometry: Geometry, material: Material) -> Self {
        let geometry_uuid = Uuid::new_v4().to_string();
        let material_uuid = Uuid::new_v4().to_string();

        Self {
            metadata: ObjectMetadata::default(),
            geometries: vec![GeometryEntry {
                uuid: geometry_uuid.clone(),
                geometry,
            }],
            materials: vec![MaterialEntry {
                uuid: material_uuid.clone(),
                material,
            }],
            object: ObjectNode {
                uuid: Uuid::new_v4().to_string(),
                kind,
                geometry: geometry_uuid,
                material: material_uuid,
                matrix: Mat4::IDENTITY.to_cols_array(),
            },
        }
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometries.first().map(|g| &g.geometry)
    }

    pub fn material(&self) -> Option<&Material> {
        self.materials.first().map(|m| &m.material)
    }
}

/// Value of a node property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Number(f32),
    Text(String),
    Vector(Vec<f32>),
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        PropertyValue::Number(value)
    }
}

/// Message sent to the scene server, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneCommand {
    SetObject {
        path: String,
        object: ObjectData,
    },
    SetTransform {
        path: String,
        /// Column-major homogeneous matrix
        matrix: [f32; 16],
    },
    Delete {
        path: String,
    },
    SetProperty {
        path: String,
        property: String,
        value: PropertyValue,
    },
}

impl SceneCommand {
    pub fn set_transform(path: String, transform: &Mat4) -> Self {
        SceneCommand::SetTransform {
            path,
            matrix: transform.to_cols_array(),
        }
    }

    /// Wire path the command addresses
    pub fn path(&self) -> &str {
        match self {
            SceneCommand::SetObject { path, .. }
            | SceneCommand::SetTransform { path, .. }
            | SceneCommand::Delete { path }
            | SceneCommand::SetProperty { path, .. } => path,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            SceneCommand::SetObject { .. } => "set_object",
            SceneCommand::SetTransform { .. } => "set_transform",
            SceneCommand::Delete { .. } => "delete",
            SceneCommand::SetProperty { .. } => "set_property",
        }
    }

    /// Encode as a msgpack map
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(rmp_serde::to_vec_named(self)?)
    }
}
