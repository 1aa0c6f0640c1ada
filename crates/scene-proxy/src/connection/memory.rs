//! In-process scene server stand-in

use std::collections::BTreeMap;
use std::sync::Arc;

use glam::Mat4;
use parking_lot::Mutex;
use scene_core::{ObjectData, PropertyValue, SceneCommand};

use super::{ConnectionError, SceneConnection};

/// State of one node as the server would hold it
#[derive(Debug, Clone, PartialEq)]
pub struct NodeState {
    pub object: Option<ObjectData>,
    pub transform: Mat4,
    pub properties: BTreeMap<String, PropertyValue>,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            object: None,
            transform: Mat4::IDENTITY,
            properties: BTreeMap::new(),
        }
    }
}

/// Node map and command log, keyed by wire path
#[derive(Debug, Default)]
pub struct MemoryScene {
    nodes: BTreeMap<String, NodeState>,
    commands: Vec<SceneCommand>,
}

impl MemoryScene {
    fn apply(&mut self, command: &SceneCommand) {
        match command {
            SceneCommand::SetObject { path, object } => {
                self.nodes.entry(path.clone()).or_default().object = Some(object.clone());
            }
            SceneCommand::SetTransform { path, matrix } => {
                self.nodes.entry(path.clone()).or_default().transform =
                    Mat4::from_cols_array(matrix);
            }
            SceneCommand::Delete { path } => {
                let prefix = format!("{}/", path);
                self.nodes
                    .retain(|key, _| key != path && !key.starts_with(&prefix));
            }
            SceneCommand::SetProperty {
                path,
                property,
                value,
            } => {
                self.nodes
                    .entry(path.clone())
                    .or_default()
                    .properties
                    .insert(property.clone(), value.clone());
            }
        }
        self.commands.push(command.clone());
    }

    pub fn node(&self, path: &str) -> Option<&NodeState> {
        self.nodes.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    /// Wire paths of all live nodes, sorted
    pub fn paths(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    /// Every command received, in order
    pub fn commands(&self) -> &[SceneCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Connection applying commands to a shared [`MemoryScene`]
///
/// Clones share the same scene, so a test can keep one clone for inspection
/// while the proxy owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnection {
    scene: Arc<Mutex<MemoryScene>>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with the current scene state
    pub fn with_scene<R>(&self, f: impl FnOnce(&MemoryScene) -> R) -> R {
        f(&self.scene.lock())
    }
}

impl SceneConnection for MemoryConnection {
    fn url(&self) -> &str {
        "memory://"
    }

    fn send(&mut self, command: &SceneCommand) -> Result<(), ConnectionError> {
        tracing::debug!("Applying {} to {}", command.type_name(), command.path());
        self.scene.lock().apply(command);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_core::{Geometry, RED};

    fn set_object(path: &str) -> SceneCommand {
        SceneCommand::SetObject {
            path: path.to_string(),
            object: ObjectData::new(Geometry::sphere(1.0), RED),
        }
    }

    #[test]
    fn test_delete_removes_subtree() {
        let mut connection = MemoryConnection::new();
        for path in ["/meshcat/a", "/meshcat/a/b", "/meshcat/ab"] {
            connection.send(&set_object(path)).unwrap();
        }

        connection
            .send(&SceneCommand::Delete {
                path: "/meshcat/a".to_string(),
            })
            .unwrap();

        connection.with_scene(|scene| {
            assert_eq!(scene.paths(), vec!["/meshcat/ab".to_string()]);
            assert_eq!(scene.commands().len(), 4);
        });
    }

    #[test]
    fn test_transform_creates_node() {
        let mut connection = MemoryConnection::new();
        let transform = Mat4::from_translation(glam::Vec3::X);
        connection
            .send(&SceneCommand::set_transform("/meshcat/t".to_string(), &transform))
            .unwrap();

        connection.with_scene(|scene| {
            let node = scene.node("/meshcat/t").unwrap();
            assert!(node.object.is_none());
            assert_eq!(node.transform, transform);
        });
    }

    #[test]
    fn test_clones_share_scene() {
        let observer = MemoryConnection::new();
        let mut writer = observer.clone();
        writer.send(&set_object("/meshcat/x")).unwrap();
        assert!(observer.with_scene(|scene| scene.contains("/meshcat/x")));
    }
}
