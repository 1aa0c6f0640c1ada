//! Scene Proxy
//!
//! Connects to a WebSocket scene server and edits its scene graph by node
//! path: primitive shapes, frame triads, axis lines, pose updates and robot
//! geometry loaded from URDF.
//!
//! # Example
//!
//! ```ignore
//! use scene_proxy::SceneProxy;
//!
//! let mut viz = SceneProxy::new(None, Some("classical"))?;
//! viz.add_sphere("world/ball", 0.1, "red")?;
//! viz.apply_configuration("world/ball", [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])?;
//! ```

pub mod config;
pub mod connection;
pub mod endpoint;
pub mod error;
pub mod node;
pub mod proxy;
pub mod robot;

pub use config::{ConfigError, ProxyConfig};
pub use connection::{
    ConnectionError, MemoryConnection, MemoryScene, SceneConnection, WebSocketConnection,
};
pub use endpoint::{CLASSICAL_URL, resolve_endpoint};
pub use error::ProxyError;
pub use node::SceneNode;
pub use proxy::SceneProxy;
pub use robot::{
    GeometryModel, GeometryObject, JointModel, KinematicModel, LoadOptions, RobotLoadError,
    RobotModel,
};

pub use scene_core::{AxisStyle, ColorSpec, FrameStyle, Material, Placement, Se3};
