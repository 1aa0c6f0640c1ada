//! Scene proxy: high-level scene editing over a scene-server connection

use glam::Vec3;
use scene_core::{
    AxisStyle, ColorSpec, FrameStyle, Geometry, Material, ObjectData, ObjectKind, Placement,
    ScenePath, Se3, axis_segment, frame_triad, resolve_material,
};

use crate::config::ProxyConfig;
use crate::connection::{SceneConnection, WebSocketConnection};
use crate::endpoint::resolve_endpoint;
use crate::error::ProxyError;
use crate::node::SceneNode;
use crate::robot::{GeometryModel, RobotModel};

/// Translates scene-editing calls into node commands on a remote scene
///
/// Holds only the connection and the robot namespace; the server is the
/// source of truth for everything displayed.
pub struct SceneProxy {
    connection: Box<dyn SceneConnection>,
    config: ProxyConfig,
}

impl SceneProxy {
    /// Connect over WebSocket and optionally load a robot
    ///
    /// `url` may be `"classical"` for the default local server; `None` uses
    /// the configured default.
    pub fn new(robot: Option<&RobotModel>, url: Option<&str>) -> Result<Self, ProxyError> {
        Self::from_config(ProxyConfig::default(), robot, url)
    }

    pub fn from_config(
        config: ProxyConfig,
        robot: Option<&RobotModel>,
        url: Option<&str>,
    ) -> Result<Self, ProxyError> {
        let url = resolve_endpoint(url.unwrap_or(config.url.as_str())).to_string();
        tracing::info!("Scene proxy tries to connect to server <{}>", url);

        let connection = WebSocketConnection::connect(&url)?;
        Self::with_connection(Box::new(connection), robot, config)
    }

    /// Connect using a RON configuration file
    pub fn from_config_file(
        path: &std::path::Path,
        robot: Option<&RobotModel>,
        url: Option<&str>,
    ) -> Result<Self, ProxyError> {
        let config = ProxyConfig::load(path)?;
        Self::from_config(config, robot, url)
    }

    /// Attach to an existing connection
    pub fn with_connection(
        connection: Box<dyn SceneConnection>,
        robot: Option<&RobotModel>,
        config: ProxyConfig,
    ) -> Result<Self, ProxyError> {
        let mut proxy = Self { connection, config };
        if let Some(robot) = robot {
            proxy.load_robot(robot)?;
        }
        Ok(proxy)
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    pub fn url(&self) -> &str {
        self.connection.url()
    }

    /// Handle on the node at `name`; the empty name is the root
    pub fn node(&mut self, name: &str) -> SceneNode<'_> {
        SceneNode::new(self.connection.as_mut(), ScenePath::parse(name))
    }

    /// Sphere mesh at `name`; pass [`ColorSpec::Random`] for no particular color
    pub fn add_sphere(
        &mut self,
        name: &str,
        radius: f32,
        color: impl Into<ColorSpec>,
    ) -> Result<(), ProxyError> {
        self.add_shape(name, Geometry::sphere(radius), &color.into())
    }

    /// Cylinder mesh along the local Y axis
    ///
    /// The color is optional: pass [`ColorSpec::Random`] (or `None::<&str>`)
    /// to pick one from the color table.
    pub fn add_cylinder(
        &mut self,
        name: &str,
        length: f32,
        radius: f32,
        color: impl Into<ColorSpec>,
    ) -> Result<(), ProxyError> {
        self.add_shape(name, Geometry::cylinder(length, radius), &color.into())
    }

    /// Box with X/Y/Z extents `dims`
    pub fn add_box(
        &mut self,
        name: &str,
        dims: [f32; 3],
        color: impl Into<ColorSpec>,
    ) -> Result<(), ProxyError> {
        self.add_shape(name, Geometry::cuboid(dims), &color.into())
    }

    fn add_shape(
        &mut self,
        name: &str,
        geometry: Geometry,
        color: &ColorSpec,
    ) -> Result<(), ProxyError> {
        let material = resolve_material(color);
        // Solid shapes stay meshes whatever material they are given
        let object = ObjectData::with_kind(ObjectKind::Mesh, geometry, material);
        self.node(name).set_object_data(object)?;
        Ok(())
    }

    /// Draw a coordinate-frame triad at `tform`
    pub fn visualize_frame(
        &mut self,
        name: &str,
        tform: &Se3,
        style: FrameStyle,
    ) -> Result<(), ProxyError> {
        let (geometry, material) = frame_triad(&style);
        let mut node = self.node(name);
        node.set_object(geometry, material)?;
        node.set_transform(&tform.homogeneous())?;
        Ok(())
    }

    /// Draw a frame triad with the configured style
    pub fn visualize_frame_default(&mut self, name: &str, tform: &Se3) -> Result<(), ProxyError> {
        let style = self.config.frame;
        self.visualize_frame(name, tform, style)
    }

    /// Draw the segment from `point` to `point + distance * direction`
    pub fn visualize_axis(
        &mut self,
        name: &str,
        point: Vec3,
        direction: Vec3,
        distance: f32,
        style: AxisStyle,
    ) -> Result<(), ProxyError> {
        let (geometry, material) = axis_segment(point, direction, distance, &style);
        self.node(name).set_object(geometry, material)?;
        Ok(())
    }

    /// Draw an axis segment with the configured style
    pub fn visualize_axis_default(
        &mut self,
        name: &str,
        point: Vec3,
        direction: Vec3,
        distance: f32,
    ) -> Result<(), ProxyError> {
        let style = self.config.axis;
        self.visualize_axis(name, point, direction, distance, style)
    }

    /// Set the pose of `name`
    ///
    /// Returns `Ok(false)` without touching the scene if the placement is not
    /// a recognized representation.
    pub fn apply_configuration(
        &mut self,
        name: &str,
        placement: impl Into<Placement>,
    ) -> Result<bool, ProxyError> {
        let transform = match placement.into().to_homogeneous() {
            Ok(transform) => transform,
            Err(e) => {
                tracing::error!("Placement for '{}' not accepted: {}", name, e);
                return Ok(false);
            }
        };

        self.node(name).set_transform(&transform)?;
        Ok(true)
    }

    /// Remove `name` and its subtree
    pub fn delete(&mut self, name: &str) -> Result<(), ProxyError> {
        self.node(name).delete()?;
        Ok(())
    }

    /// Load visual and collision geometry under the robot namespace
    ///
    /// Collision geometry is hidden unless `show_collisions` is set.
    pub fn load_robot(&mut self, robot: &RobotModel) -> Result<(), ProxyError> {
        tracing::info!(
            "Loading robot '{}' under '{}'",
            robot.model.name,
            self.config.robot_namespace
        );

        let namespace = ScenePath::parse(&self.config.robot_namespace);
        self.load_geometry(robot, &robot.visual_model, &namespace.join("visuals"), true)?;

        let show_collisions = self.config.show_collisions;
        self.load_geometry(
            robot,
            &robot.collision_model,
            &namespace.join("collisions"),
            show_collisions,
        )?;
        Ok(())
    }

    fn load_geometry(
        &mut self,
        robot: &RobotModel,
        geometry_model: &GeometryModel,
        prefix: &ScenePath,
        visible: bool,
    ) -> Result<(), ProxyError> {
        let link_placements = robot.model.neutral_link_placements();

        for object in geometry_model.iter() {
            let link_placement = link_placements
                .get(&object.parent_link)
                .copied()
                .unwrap_or_else(|| {
                    tracing::warn!(
                        "Link '{}' is not reachable from a root link, placing '{}' at the origin",
                        object.parent_link,
                        object.name
                    );
                    glam::Mat4::IDENTITY
                });

            let mut node = SceneNode::new(self.connection.as_mut(), prefix.join(&object.name));
            node.set_object(object.geometry.clone(), Material::from_rgba(object.color))?;
            node.set_transform(&(link_placement * object.local_transform()))?;
            if !visible {
                node.set_property("visible", false)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::MemoryConnection;
    use crate::robot::{GeometryObject, JointModel, KinematicModel};
    use glam::{Mat4, Vec4};
    use scene_core::{COLORMAP, ObjectKind, PropertyValue, SceneCommand};

    fn memory_proxy() -> (SceneProxy, MemoryConnection) {
        let observer = MemoryConnection::new();
        let proxy =
            SceneProxy::with_connection(Box::new(observer.clone()), None, ProxyConfig::default())
                .unwrap();
        (proxy, observer)
    }

    #[test]
    fn test_add_shapes() {
        let (mut viz, scene) = memory_proxy();
        viz.add_sphere("world/ball", 0.1, "red").unwrap();
        viz.add_cylinder("world/rod", 1.0, 0.05, ColorSpec::Random).unwrap();
        viz.add_box("world/crate", [1.0, 2.0, 3.0], [0.0, 1.0, 0.0, 0.5]).unwrap();

        scene.with_scene(|scene| {
            let ball = scene.node("/meshcat/world/ball").unwrap().object.as_ref().unwrap();
            assert_eq!(ball.geometry(), Some(&Geometry::sphere(0.1)));
            assert_eq!(ball.material().unwrap().color, 0xff0000);

            let rod = scene.node("/meshcat/world/rod").unwrap().object.as_ref().unwrap();
            assert_eq!(rod.geometry(), Some(&Geometry::cylinder(1.0, 0.05)));
            let rod_material = rod.material().unwrap();
            assert!(COLORMAP.iter().any(|(_, m)| m == rod_material));

            let crate_box = scene.node("/meshcat/world/crate").unwrap().object.as_ref().unwrap();
            assert_eq!(crate_box.geometry(), Some(&Geometry::cuboid([1.0, 2.0, 3.0])));
            assert!(crate_box.material().unwrap().transparent);
            assert_eq!(crate_box.material().unwrap().opacity, 0.5);
        });
    }

    #[test]
    fn test_shapes_stay_meshes_with_line_material() {
        let (mut viz, scene) = memory_proxy();
        let line = Material::line_vertex_colors(2.0);
        viz.add_sphere("s", 1.0, line).unwrap();
        viz.add_cylinder("c", 1.0, 0.1, line).unwrap();
        viz.add_box("b", [1.0, 1.0, 1.0], line).unwrap();

        scene.with_scene(|scene| {
            for path in ["/meshcat/s", "/meshcat/c", "/meshcat/b"] {
                let object = scene.node(path).unwrap().object.as_ref().unwrap();
                assert_eq!(object.object.kind, ObjectKind::Mesh);
                assert_eq!(object.material(), Some(&line));
            }
        });
    }

    #[test]
    fn test_delete_after_add() {
        let (mut viz, scene) = memory_proxy();
        viz.add_sphere("nodeX", 1.0, "red").unwrap();
        viz.add_sphere("nodeX/child", 0.5, "blue").unwrap();
        viz.delete("nodeX").unwrap();

        let path = viz.node("nodeX").path().to_wire();
        scene.with_scene(|scene| {
            assert!(!scene.contains(&path));
            assert!(!scene.contains("/meshcat/nodeX/child"));
            assert!(scene.is_empty());
        });
    }

    #[test]
    fn test_visualize_frame() {
        let (mut viz, scene) = memory_proxy();
        let tform = Se3::from_translation(Vec3::new(1.0, 0.0, 0.0));
        viz.visualize_frame("frameA", &Se3::IDENTITY, FrameStyle::default().with_length(1.0))
            .unwrap();
        viz.visualize_frame_default("frameB", &tform).unwrap();

        scene.with_scene(|scene| {
            let frame = scene.node("/meshcat/frameA").unwrap();
            let object = frame.object.as_ref().unwrap();
            assert_eq!(object.object.kind, ObjectKind::LineSegments);

            let positions = object.geometry().unwrap().positions().unwrap();
            assert_eq!(positions[1], [1.0, 0.0, 0.0]);
            assert_eq!(positions[3], [0.0, 1.0, 0.0]);
            assert_eq!(positions[5], [0.0, 0.0, 1.0]);
            assert_eq!(frame.transform, Mat4::IDENTITY);

            let frame_b = scene.node("/meshcat/frameB").unwrap();
            assert_eq!(frame_b.transform.w_axis, Vec4::new(1.0, 0.0, 0.0, 1.0));
            let positions = frame_b
                .object
                .as_ref()
                .unwrap()
                .geometry()
                .unwrap()
                .positions()
                .unwrap();
            approx::assert_relative_eq!(positions[1][0], 0.2);
        });
    }

    #[test]
    fn test_visualize_axis() {
        let (mut viz, scene) = memory_proxy();
        viz.visualize_axis_default("axisA", Vec3::ZERO, Vec3::Z, 2.0).unwrap();

        scene.with_scene(|scene| {
            let object = scene.node("/meshcat/axisA").unwrap().object.as_ref().unwrap();
            let geometry = object.geometry().unwrap();
            assert_eq!(
                geometry.positions().unwrap(),
                vec![[0.0, 0.0, 0.0], [0.0, 0.0, 2.0]]
            );
            assert_eq!(geometry.colors().unwrap()[1], [0.0, 0.0, 1.0]);
            assert_eq!(object.material().unwrap().linewidth, 3.0);
        });
    }

    #[test]
    fn test_apply_configuration_forms() {
        let (mut viz, scene) = memory_proxy();

        let se3 = Se3::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert!(viz.apply_configuration("a", se3).unwrap());
        assert!(viz.apply_configuration("b", [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]).unwrap());
        assert!(viz.apply_configuration("c", Mat4::from_translation(Vec3::Y)).unwrap());

        scene.with_scene(|scene| {
            for path in ["/meshcat/a", "/meshcat/b", "/meshcat/c"] {
                let transform = scene.node(path).unwrap().transform;
                assert_eq!(transform.row(3), Vec4::new(0.0, 0.0, 0.0, 1.0));
            }
            assert_eq!(
                scene.node("/meshcat/b").unwrap().transform.w_axis,
                Vec4::new(0.0, 0.0, 1.0, 1.0)
            );
        });
    }

    #[test]
    fn test_apply_configuration_rejects_without_sending() {
        let (mut viz, scene) = memory_proxy();
        viz.add_sphere("ball", 0.1, "red").unwrap();

        assert!(!viz.apply_configuration("ball", vec![0.0_f32; 5]).unwrap());
        assert!(!viz.apply_configuration("ball", vec![vec![1.0_f32, 2.0]]).unwrap());

        scene.with_scene(|scene| {
            assert_eq!(scene.commands().len(), 1);
            assert_eq!(scene.node("/meshcat/ball").unwrap().transform, Mat4::IDENTITY);
        });
    }

    #[test]
    fn test_item_lookup() {
        let (mut viz, scene) = memory_proxy();
        viz.node("custom").at("child").set_property("visible", false).unwrap();

        scene.with_scene(|scene| {
            let node = scene.node("/meshcat/custom/child").unwrap();
            assert_eq!(node.properties["visible"], PropertyValue::Bool(false));
        });
        assert!(viz.node("").path().is_root());
    }

    fn single_link_robot() -> RobotModel {
        let model = KinematicModel {
            name: "pendulum".to_string(),
            links: vec!["base".to_string(), "bob".to_string()],
            joints: vec![JointModel {
                name: "hinge".to_string(),
                parent_link: "base".to_string(),
                child_link: "bob".to_string(),
                origin: Mat4::from_translation(Vec3::new(0.0, 0.0, -1.0)),
            }],
        };
        let bob = GeometryObject {
            name: "bob_0".to_string(),
            parent_link: "bob".to_string(),
            placement: Mat4::IDENTITY,
            geometry: Geometry::sphere(0.1),
            scale: Vec3::ONE,
            color: [1.0, 0.0, 0.0, 1.0],
        };
        let visual = GeometryModel {
            objects: vec![bob.clone()],
        };
        let collision = GeometryModel { objects: vec![bob] };
        RobotModel::from_parts(model, collision, visual)
    }

    #[test]
    fn test_load_robot() {
        let observer = MemoryConnection::new();
        let robot = single_link_robot();
        SceneProxy::with_connection(
            Box::new(observer.clone()),
            Some(&robot),
            ProxyConfig::default(),
        )
        .unwrap();

        observer.with_scene(|scene| {
            let visual = scene.node("/meshcat/pinocchio/visuals/bob_0").unwrap();
            assert_eq!(visual.transform.w_axis, Vec4::new(0.0, 0.0, -1.0, 1.0));
            assert_eq!(
                visual.object.as_ref().unwrap().material().unwrap().color,
                0xff0000
            );
            assert!(visual.properties.is_empty());

            let collision = scene.node("/meshcat/pinocchio/collisions/bob_0").unwrap();
            assert_eq!(collision.properties["visible"], PropertyValue::Bool(false));

            let set_objects = scene
                .commands()
                .iter()
                .filter(|c| matches!(c, SceneCommand::SetObject { .. }))
                .count();
            assert_eq!(set_objects, 2);
        });
    }

    #[test]
    fn test_load_robot_from_urdf() {
        let xml = r#"<robot name="arm">
  <link name="a">
    <visual>
      <geometry><box size="0.1 0.1 0.1"/></geometry>
    </visual>
  </link>
  <link name="b">
    <visual>
      <origin xyz="0.5 0 0" rpy="0 0 0"/>
      <geometry><sphere radius="0.05"/></geometry>
    </visual>
    <visual>
      <geometry><box size="0.2 0.2 0.2"/></geometry>
    </visual>
  </link>
  <joint name="elbow" type="revolute">
    <parent link="a"/>
    <child link="b"/>
    <origin xyz="0 0 2" rpy="0 0 0"/>
    <axis xyz="0 1 0"/>
    <limit lower="-1" upper="1" effort="10" velocity="1"/>
  </joint>
</robot>"#;
        let robot = RobotModel::from_urdf_str(xml, &crate::robot::LoadOptions::default()).unwrap();

        let observer = MemoryConnection::new();
        SceneProxy::with_connection(
            Box::new(observer.clone()),
            Some(&robot),
            ProxyConfig::default(),
        )
        .unwrap();

        observer.with_scene(|scene| {
            assert_eq!(
                scene.paths(),
                vec![
                    "/meshcat/pinocchio/visuals/a_0".to_string(),
                    "/meshcat/pinocchio/visuals/b_0".to_string(),
                    "/meshcat/pinocchio/visuals/b_1".to_string(),
                ]
            );

            let a = scene.node("/meshcat/pinocchio/visuals/a_0").unwrap();
            assert_eq!(a.transform, Mat4::IDENTITY);

            let b0 = scene.node("/meshcat/pinocchio/visuals/b_0").unwrap();
            assert!(
                b0.transform
                    .w_axis
                    .abs_diff_eq(Vec4::new(0.5, 0.0, 2.0, 1.0), 1e-6)
            );
            assert_eq!(
                b0.object.as_ref().unwrap().geometry(),
                Some(&Geometry::sphere(0.05))
            );

            let b1 = scene.node("/meshcat/pinocchio/visuals/b_1").unwrap();
            assert!(
                b1.transform
                    .w_axis
                    .abs_diff_eq(Vec4::new(0.0, 0.0, 2.0, 1.0), 1e-6)
            );
        });
    }

    #[test]
    fn test_load_robot_custom_namespace() {
        let observer = MemoryConnection::new();
        let config = ProxyConfig {
            robot_namespace: "robots/pendulum".to_string(),
            show_collisions: true,
            ..ProxyConfig::default()
        };
        SceneProxy::with_connection(
            Box::new(observer.clone()),
            Some(&single_link_robot()),
            config,
        )
        .unwrap();

        observer.with_scene(|scene| {
            assert!(scene.contains("/meshcat/robots/pendulum/visuals/bob_0"));
            let collision = scene
                .node("/meshcat/robots/pendulum/collisions/bob_0")
                .unwrap();
            assert!(collision.properties.is_empty());
        });
    }

    #[test]
    fn test_missing_config_file() {
        let path = std::env::temp_dir().join("scene-proxy-missing-config.ron");
        let result = SceneProxy::from_config_file(&path, None, None);
        assert!(matches!(result, Err(ProxyError::Config(_))));
    }

    #[test]
    fn test_connect_failure_propagates() {
        let result = SceneProxy::new(None, Some("ws://127.0.0.1:9"));
        assert!(matches!(result, Err(ProxyError::Connection(_))));
    }
}
