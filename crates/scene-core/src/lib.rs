//! Scene Core Data Structures
//!
//! Pure data types for editing a remote scene-graph viewer:
//! - Material: three.js style materials, the named color table and the resolver
//! - Geometry: primitive, line and mesh-file geometries
//! - Placement: poses normalized to homogeneous transforms
//! - Frame: coordinate-frame triad and axis-line templates
//! - Command: node-addressed scene commands and their msgpack encoding

pub mod color;
pub mod command;
pub mod frame;
pub mod geometry;
pub mod material;
pub mod path;
pub mod pose;

pub use color::*;
pub use command::*;
pub use frame::*;
pub use geometry::*;
pub use material::*;
pub use path::*;
pub use pose::*;
