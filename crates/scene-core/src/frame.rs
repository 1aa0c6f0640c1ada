//! Coordinate-frame triad and axis-line templates

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::geometry::Geometry;
use crate::material::Material;

/// Segment endpoints of a unit triad: origin to X, origin to Y, origin to Z
pub const FRAME_AXIS_POSITIONS: [[f32; 3]; 6] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Per-vertex colors: red/orange, green/yellow-green, blue/light-blue
pub const FRAME_AXIS_COLORS: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [1.0, 0.6, 0.0],
    [0.0, 1.0, 0.0],
    [0.6, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.6, 1.0],
];

/// Frame triad appearance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameStyle {
    /// Length of each axis
    pub line_length: f32,
    pub line_width: f32,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            line_length: 0.2,
            line_width: 3.0,
        }
    }
}

impl FrameStyle {
    pub fn with_length(mut self, line_length: f32) -> Self {
        self.line_length = line_length;
        self
    }

    pub fn with_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }
}

/// Axis line appearance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    pub line_width: f32,
    /// RGB in [0, 1]
    pub color: [f32; 3],
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            line_width: 3.0,
            color: [0.0, 0.0, 1.0],
        }
    }
}

impl AxisStyle {
    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }
}

/// Line segments for a frame triad scaled by `line_length`
pub fn frame_triad(style: &FrameStyle) -> (Geometry, Material) {
    let positions: Vec<[f32; 3]> = FRAME_AXIS_POSITIONS
        .iter()
        .map(|p| (Vec3::from(*p) * style.line_length).to_array())
        .collect();

    (
        Geometry::points(&positions, Some(&FRAME_AXIS_COLORS)),
        Material::line_vertex_colors(style.line_width),
    )
}

/// Single segment from `point` to `point + distance * direction`
pub fn axis_segment(
    point: Vec3,
    direction: Vec3,
    distance: f32,
    style: &AxisStyle,
) -> (Geometry, Material) {
    let end = point + distance * direction;
    let positions = [point.to_array(), end.to_array()];
    let colors = [style.color, style.color];

    (
        Geometry::points(&positions, Some(&colors)),
        Material::line_vertex_colors(style.line_width),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_triad_endpoints() {
        let (geometry, material) = frame_triad(&FrameStyle::default().with_length(1.0));
        let positions = geometry.positions().unwrap();

        assert_eq!(positions.len(), 6);
        assert_eq!(positions[1], [1.0, 0.0, 0.0]);
        assert_eq!(positions[3], [0.0, 1.0, 0.0]);
        assert_eq!(positions[5], [0.0, 0.0, 1.0]);
        for origin in [positions[0], positions[2], positions[4]] {
            assert_eq!(origin, [0.0, 0.0, 0.0]);
        }

        assert!(material.vertex_colors);
        assert_eq!(material.linewidth, 3.0);
        assert_eq!(geometry.colors().unwrap(), FRAME_AXIS_COLORS.to_vec());
    }

    #[test]
    fn test_triad_scaling() {
        let (geometry, _) = frame_triad(&FrameStyle::default());
        let positions = geometry.positions().unwrap();
        approx::assert_relative_eq!(positions[1][0], 0.2);
        approx::assert_relative_eq!(positions[5][2], 0.2);
    }

    #[test]
    fn test_axis_segment() {
        let (geometry, material) = axis_segment(Vec3::ZERO, Vec3::Z, 2.0, &AxisStyle::default());
        assert_eq!(
            geometry.positions().unwrap(),
            vec![[0.0, 0.0, 0.0], [0.0, 0.0, 2.0]]
        );
        assert_eq!(
            geometry.colors().unwrap(),
            vec![[0.0, 0.0, 1.0], [0.0, 0.0, 1.0]]
        );
        assert_eq!(material.linewidth, 3.0);
    }

    #[test]
    fn test_axis_segment_offset() {
        let style = AxisStyle::default().with_color([1.0, 0.0, 0.0]).with_width(5.0);
        let (geometry, material) =
            axis_segment(Vec3::new(1.0, 1.0, 0.0), Vec3::X, -0.5, &style);
        assert_eq!(geometry.positions().unwrap()[1], [0.5, 1.0, 0.0]);
        assert_eq!(geometry.colors().unwrap()[0], [1.0, 0.0, 0.0]);
        assert_eq!(material.linewidth, 5.0);
    }
}
