//! Handle on a single scene node

use glam::Mat4;
use scene_core::{Geometry, Material, ObjectData, PropertyValue, SceneCommand, ScenePath};

use crate::connection::{ConnectionError, SceneConnection};

/// A node addressed by path, borrowed from a proxy's connection
///
/// Nothing is cached: every call is one command to the server.
pub struct SceneNode<'a> {
    connection: &'a mut dyn SceneConnection,
    path: ScenePath,
}

impl<'a> SceneNode<'a> {
    pub fn new(connection: &'a mut dyn SceneConnection, path: ScenePath) -> Self {
        Self { connection, path }
    }

    pub fn path(&self) -> &ScenePath {
        &self.path
    }

    /// Child node below this one
    pub fn at(&mut self, name: &str) -> SceneNode<'_> {
        SceneNode {
            connection: &mut *self.connection,
            path: self.path.join(name),
        }
    }

    /// Replace the node's geometry and material
    pub fn set_object(
        &mut self,
        geometry: Geometry,
        material: Material,
    ) -> Result<(), ConnectionError> {
        self.set_object_data(ObjectData::new(geometry, material))
    }

    pub fn set_object_data(&mut self, object: ObjectData) -> Result<(), ConnectionError> {
        self.send(SceneCommand::SetObject {
            path: self.path.to_wire(),
            object,
        })
    }

    /// Set the node's pose
    pub fn set_transform(&mut self, transform: &Mat4) -> Result<(), ConnectionError> {
        self.send(SceneCommand::set_transform(self.path.to_wire(), transform))
    }

    pub fn set_property(
        &mut self,
        property: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<(), ConnectionError> {
        self.send(SceneCommand::SetProperty {
            path: self.path.to_wire(),
            property: property.to_string(),
            value: value.into(),
        })
    }

    /// Remove the node and its subtree
    pub fn delete(&mut self) -> Result<(), ConnectionError> {
        self.send(SceneCommand::Delete {
            path: self.path.to_wire(),
        })
    }

    fn send(&mut self, command: SceneCommand) -> Result<(), ConnectionError> {
        self.connection.send(&command)
    }
}
