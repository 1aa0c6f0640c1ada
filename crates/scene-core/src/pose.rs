//! Placements and their normalization to homogeneous transforms

use glam::{Mat3, Mat4, Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Rigid transform as a rotation matrix plus translation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Se3 {
    pub rotation: Mat3,
    pub translation: Vec3,
}

impl Se3 {
    pub const IDENTITY: Self = Self {
        rotation: Mat3::IDENTITY,
        translation: Vec3::ZERO,
    };

    pub fn new(rotation: Mat3, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            rotation: Mat3::IDENTITY,
            translation,
        }
    }

    pub fn from_quat_translation(rotation: Quat, translation: Vec3) -> Self {
        Self {
            rotation: Mat3::from_quat(rotation),
            translation,
        }
    }

    /// 4x4 homogeneous matrix
    pub fn homogeneous(&self) -> Mat4 {
        Mat4::from_cols(
            self.rotation.x_axis.extend(0.0),
            self.rotation.y_axis.extend(0.0),
            self.rotation.z_axis.extend(0.0),
            self.translation.extend(1.0),
        )
    }
}

impl Default for Se3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Rejected placement representations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementError {
    #[error("Placement vector must have 7 elements (xyz + quaternion), got {0}")]
    VectorLength(usize),

    #[error("Placement matrix must be 4x4 or 3x4, got {rows}x{cols}")]
    MatrixShape { rows: usize, cols: usize },

    #[error("Placement matrix bottom row must be [0, 0, 0, 1], got {0:?}")]
    NotHomogeneous([f32; 4]),

    #[error("Placement quaternion has zero norm")]
    DegenerateQuaternion,
}

/// Caller-supplied pose in one of the accepted representations
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// Rotation + translation
    Se3(Se3),
    /// x, y, z, qx, qy, qz, qw
    Vector(Vec<f32>),
    /// Homogeneous matrix
    Matrix(Mat4),
    /// Row-major 4x4, or 3x4 with an implicit [0, 0, 0, 1] bottom row
    Rows(Vec<Vec<f32>>),
}

impl Placement {
    /// Normalize to a 4x4 homogeneous transform with bottom row [0, 0, 0, 1]
    pub fn to_homogeneous(&self) -> Result<Mat4, PlacementError> {
        match self {
            Placement::Se3(se3) => Ok(se3.homogeneous()),
            Placement::Vector(values) => xyz_quat_to_mat4(values),
            Placement::Matrix(matrix) => {
                check_bottom_row(matrix.row(3))?;
                Ok(*matrix)
            }
            Placement::Rows(rows) => rows_to_mat4(rows),
        }
    }
}

impl From<Se3> for Placement {
    fn from(se3: Se3) -> Self {
        Placement::Se3(se3)
    }
}

impl From<Mat4> for Placement {
    fn from(matrix: Mat4) -> Self {
        Placement::Matrix(matrix)
    }
}

impl From<[f32; 7]> for Placement {
    fn from(values: [f32; 7]) -> Self {
        Placement::Vector(values.to_vec())
    }
}

impl From<Vec<f32>> for Placement {
    fn from(values: Vec<f32>) -> Self {
        Placement::Vector(values)
    }
}

impl From<&[f32]> for Placement {
    fn from(values: &[f32]) -> Self {
        Placement::Vector(values.to_vec())
    }
}

impl From<Vec<Vec<f32>>> for Placement {
    fn from(rows: Vec<Vec<f32>>) -> Self {
        Placement::Rows(rows)
    }
}

impl From<[[f32; 4]; 4]> for Placement {
    fn from(rows: [[f32; 4]; 4]) -> Self {
        Placement::Rows(rows.iter().map(|r| r.to_vec()).collect())
    }
}

fn xyz_quat_to_mat4(values: &[f32]) -> Result<Mat4, PlacementError> {
    let [x, y, z, qx, qy, qz, qw] = values else {
        return Err(PlacementError::VectorLength(values.len()));
    };

    let quat = Quat::from_xyzw(*qx, *qy, *qz, *qw);
    let norm = quat.length();
    if norm <= f32::EPSILON || !norm.is_finite() {
        return Err(PlacementError::DegenerateQuaternion);
    }

    Ok(Se3::from_quat_translation(quat / norm, Vec3::new(*x, *y, *z)).homogeneous())
}

fn rows_to_mat4(rows: &[Vec<f32>]) -> Result<Mat4, PlacementError> {
    let cols = rows.first().map(Vec::len).unwrap_or(0);
    if !(rows.len() == 3 || rows.len() == 4) || rows.iter().any(|r| r.len() != 4) {
        return Err(PlacementError::MatrixShape {
            rows: rows.len(),
            cols,
        });
    }

    let bottom = match rows.get(3) {
        Some(row) => Vec4::new(row[0], row[1], row[2], row[3]),
        None => Vec4::W,
    };
    check_bottom_row(bottom)?;

    let row = |i: usize| Vec4::new(rows[i][0], rows[i][1], rows[i][2], rows[i][3]);
    Ok(Mat4::from_cols(row(0), row(1), row(2), bottom).transpose())
}

fn check_bottom_row(row: Vec4) -> Result<(), PlacementError> {
    if row == Vec4::W {
        Ok(())
    } else {
        Err(PlacementError::NotHomogeneous(row.to_array()))
    }
}
