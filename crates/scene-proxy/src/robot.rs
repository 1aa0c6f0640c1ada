//! Robot model loading from URDF
//!
//! Produces the three parts a robot is displayed from: the kinematic tree,
//! the collision geometry and the visual geometry.

use std::collections::{HashMap, HashSet};
use std::f32::consts::FRAC_PI_2;
use std::path::{Path, PathBuf};

use glam::{Mat4, Quat, Vec3};
use scene_core::{Geometry, MeshData, MeshFormat};

/// Options for URDF loading
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Base directory for relative mesh paths; defaults to the URDF's directory
    pub base_dir: Option<PathBuf>,
    /// Directories searched for `package://<package>/...` mesh references
    pub package_dirs: Vec<PathBuf>,
    /// Color for geometry without a material
    pub default_color: [f32; 4],
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            base_dir: None,
            package_dirs: Vec::new(),
            default_color: [0.7, 0.7, 0.7, 1.0],
        }
    }
}

/// Errors that can occur while loading a robot
#[derive(Debug, Clone, thiserror::Error)]
pub enum RobotLoadError {
    #[error("Failed to parse URDF: {0}")]
    UrdfParse(String),

    #[error("IO error reading '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("Mesh file not found: {path}")]
    MeshNotFound { path: String },

    #[error("Unsupported mesh format: {0} (expected stl, obj or dae)")]
    UnsupportedMeshFormat(String),

    #[error("Package not found in package_dirs: {0}")]
    PackageNotFound(String),

    #[error("Link not found: {0}")]
    LinkNotFound(String),

    #[error("Empty URDF: no links defined")]
    EmptyUrdf,
}

/// Joint connecting two links, at its neutral position
#[derive(Debug, Clone, PartialEq)]
pub struct JointModel {
    pub name: String,
    pub parent_link: String,
    pub child_link: String,
    /// Child link frame relative to the parent link frame
    pub origin: Mat4,
}

/// Link tree of a robot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KinematicModel {
    pub name: String,
    pub links: Vec<String>,
    pub joints: Vec<JointModel>,
}

impl KinematicModel {
    /// Links that are not the child of any joint
    pub fn root_links(&self) -> Vec<&str> {
        let children: HashSet<&str> = self.joints.iter().map(|j| j.child_link.as_str()).collect();
        self.links
            .iter()
            .map(String::as_str)
            .filter(|l| !children.contains(l))
            .collect()
    }

    /// World transform of every link with all joints at zero
    pub fn neutral_link_placements(&self) -> HashMap<String, Mat4> {
        let mut children: HashMap<&str, Vec<&JointModel>> = HashMap::new();
        for joint in &self.joints {
            children.entry(joint.parent_link.as_str()).or_default().push(joint);
        }

        let mut placements = HashMap::new();
        let mut stack: Vec<(&str, Mat4)> = self
            .root_links()
            .into_iter()
            .map(|root| (root, Mat4::IDENTITY))
            .collect();

        while let Some((link, transform)) = stack.pop() {
            // A link reached twice means a malformed tree; keep the first placement
            if placements.contains_key(link) {
                continue;
            }
            placements.insert(link.to_string(), transform);

            if let Some(joints) = children.get(link) {
                for joint in joints {
                    stack.push((joint.child_link.as_str(), transform * joint.origin));
                }
            }
        }

        placements
    }
}

/// Geometry attached to a link
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryObject {
    pub name: String,
    pub parent_link: String,
    /// Pose relative to the parent link
    pub placement: Mat4,
    pub geometry: Geometry,
    pub scale: Vec3,
    pub color: [f32; 4],
}

impl GeometryObject {
    /// Placement including the mesh scale
    pub fn local_transform(&self) -> Mat4 {
        self.placement * Mat4::from_scale(self.scale)
    }
}

/// Set of geometry objects (visual or collision)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryModel {
    pub objects: Vec<GeometryObject>,
}

impl GeometryModel {
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeometryObject> {
        self.objects.iter()
    }
}

/// Robot description: kinematic tree plus collision and visual geometry
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RobotModel {
    pub model: KinematicModel,
    pub collision_model: GeometryModel,
    pub visual_model: GeometryModel,
}

impl RobotModel {
    pub fn from_parts(
        model: KinematicModel,
        collision_model: GeometryModel,
        visual_model: GeometryModel,
    ) -> Self {
        Self {
            model,
            collision_model,
            visual_model,
        }
    }

    /// Load a URDF file; relative meshes resolve against its directory
    pub fn from_urdf_file(path: &Path, options: &LoadOptions) -> Result<Self, RobotLoadError> {
        let robot =
            urdf_rs::read_file(path).map_err(|e| RobotLoadError::UrdfParse(e.to_string()))?;

        let base_dir = options.base_dir.clone().unwrap_or_else(|| {
            path.parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        });

        Self::from_urdf(&robot, &base_dir, options)
    }

    /// Load URDF text; relative meshes resolve against `base_dir` or `.`
    pub fn from_urdf_str(xml: &str, options: &LoadOptions) -> Result<Self, RobotLoadError> {
        let robot =
            urdf_rs::read_from_string(xml).map_err(|e| RobotLoadError::UrdfParse(e.to_string()))?;
        let base_dir = options.base_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        Self::from_urdf(&robot, &base_dir, options)
    }

    fn from_urdf(
        robot: &urdf_rs::Robot,
        base_dir: &Path,
        options: &LoadOptions,
    ) -> Result<Self, RobotLoadError> {
        if robot.links.is_empty() {
            return Err(RobotLoadError::EmptyUrdf);
        }

        let material_colors: HashMap<&str, [f32; 4]> = robot
            .materials
            .iter()
            .filter_map(|m| m.color.as_ref().map(|c| (m.name.as_str(), convert_color(c))))
            .collect();

        let links: Vec<String> = robot.links.iter().map(|l| l.name.clone()).collect();
        let link_names: HashSet<&str> = links.iter().map(String::as_str).collect();

        let mut joints = Vec::with_capacity(robot.joints.len());
        for joint in &robot.joints {
            for link in [&joint.parent.link, &joint.child.link] {
                if !link_names.contains(link.as_str()) {
                    return Err(RobotLoadError::LinkNotFound(link.clone()));
                }
            }
            joints.push(JointModel {
                name: joint.name.clone(),
                parent_link: joint.parent.link.clone(),
                child_link: joint.child.link.clone(),
                origin: pose_to_mat4(&joint.origin),
            });
        }

        let mut visual_model = GeometryModel::default();
        let mut collision_model = GeometryModel::default();

        for link in &robot.links {
            for (i, visual) in link.visual.iter().enumerate() {
                let color = visual
                    .material
                    .as_ref()
                    .and_then(|mat| {
                        mat.color
                            .as_ref()
                            .map(convert_color)
                            .or_else(|| material_colors.get(mat.name.as_str()).copied())
                    })
                    .unwrap_or(options.default_color);

                visual_model.objects.push(convert_geometry(
                    format!("{}_{}", link.name, i),
                    &link.name,
                    &visual.origin,
                    &visual.geometry,
                    color,
                    base_dir,
                    options,
                )?);
            }

            for (i, collision) in link.collision.iter().enumerate() {
                collision_model.objects.push(convert_geometry(
                    format!("{}_{}", link.name, i),
                    &link.name,
                    &collision.origin,
                    &collision.geometry,
                    options.default_color,
                    base_dir,
                    options,
                )?);
            }
        }

        tracing::info!(
            "Loaded robot '{}': {} links, {} joints, {} visuals, {} collisions",
            robot.name,
            links.len(),
            joints.len(),
            visual_model.len(),
            collision_model.len()
        );

        Ok(Self {
            model: KinematicModel {
                name: robot.name.clone(),
                links,
                joints,
            },
            collision_model,
            visual_model,
        })
    }
}

/// Convert a URDF geometry element into a geometry object
fn convert_geometry(
    name: String,
    link: &str,
    origin: &urdf_rs::Pose,
    geometry: &urdf_rs::Geometry,
    color: [f32; 4],
    base_dir: &Path,
    options: &LoadOptions,
) -> Result<GeometryObject, RobotLoadError> {
    let mut placement = pose_to_mat4(origin);
    let mut scale = Vec3::ONE;

    let geometry = match geometry {
        urdf_rs::Geometry::Box { size } => {
            Geometry::cuboid([size.0[0] as f32, size.0[1] as f32, size.0[2] as f32])
        }
        urdf_rs::Geometry::Sphere { radius } => Geometry::sphere(*radius as f32),
        // Viewer cylinders run along Y, URDF cylinders along Z
        urdf_rs::Geometry::Cylinder { radius, length }
        | urdf_rs::Geometry::Capsule { radius, length } => {
            placement *= Mat4::from_rotation_x(FRAC_PI_2);
            Geometry::cylinder(*length as f32, *radius as f32)
        }
        urdf_rs::Geometry::Mesh { filename, scale: s } => {
            if let Some(s) = s {
                scale = Vec3::new(s.0[0] as f32, s.0[1] as f32, s.0[2] as f32);
            }
            load_mesh(filename, base_dir, &options.package_dirs)?
        }
    };

    Ok(GeometryObject {
        name,
        parent_link: link.to_string(),
        placement,
        geometry,
        scale,
        color,
    })
}

/// Read a mesh file into a mesh-file geometry
fn load_mesh(
    filename: &str,
    base_dir: &Path,
    package_dirs: &[PathBuf],
) -> Result<Geometry, RobotLoadError> {
    let path = resolve_mesh_path(filename, base_dir, package_dirs)?;

    let format = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(MeshFormat::from_extension)
        .ok_or_else(|| RobotLoadError::UnsupportedMeshFormat(filename.to_string()))?;

    let bytes = std::fs::read(&path).map_err(|e| RobotLoadError::Io {
        path: path.to_string_lossy().to_string(),
        reason: e.to_string(),
    })?;

    let data = if format.is_binary() {
        MeshData::Binary(bytes)
    } else {
        MeshData::Text(String::from_utf8_lossy(&bytes).into_owned())
    };

    Ok(Geometry::mesh_file(format, data))
}

/// Resolve a URDF mesh reference to a file on disk
fn resolve_mesh_path(
    filename: &str,
    base_dir: &Path,
    package_dirs: &[PathBuf],
) -> Result<PathBuf, RobotLoadError> {
    if let Some(rest) = filename.strip_prefix("package://") {
        return package_dirs
            .iter()
            .map(|dir| dir.join(rest))
            .find(|candidate| candidate.exists())
            .ok_or_else(|| RobotLoadError::PackageNotFound(filename.to_string()));
    }

    let path_str = filename.strip_prefix("file://").unwrap_or(filename);

    let path = if Path::new(path_str).is_absolute() {
        PathBuf::from(path_str)
    } else {
        base_dir.join(path_str)
    };

    if !path.exists() {
        return Err(RobotLoadError::MeshNotFound {
            path: path.to_string_lossy().to_string(),
        });
    }

    Ok(path)
}

/// URDF pose to a homogeneous transform (rotation is Rz(yaw) * Ry(pitch) * Rx(roll))
fn pose_to_mat4(pose: &urdf_rs::Pose) -> Mat4 {
    let translation = Vec3::new(pose.xyz.0[0] as f32, pose.xyz.0[1] as f32, pose.xyz.0[2] as f32);
    let rotation = Quat::from_rotation_z(pose.rpy.0[2] as f32)
        * Quat::from_rotation_y(pose.rpy.0[1] as f32)
        * Quat::from_rotation_x(pose.rpy.0[0] as f32);
    Mat4::from_rotation_translation(rotation, translation)
}

fn convert_color(color: &urdf_rs::Color) -> [f32; 4] {
    [
        color.rgba.0[0] as f32,
        color.rgba.0[1] as f32,
        color.rgba.0[2] as f32,
        color.rgba.0[3] as f32,
    ]
}
