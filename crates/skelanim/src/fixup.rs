//! Coordinate conventions for skinning output
//!
//! Assets are authored in their own axis convention. An [`AnimationPlayer`]
//! applies a fixed axis remap after skinning so the palette lands in the
//! engine's convention, and [`MatrixLayout`] decides how the palette is
//! flattened for upload.
//!
//! # Examples
//!
//! ```rust
//! use glam::Vec3;
//! use skelanim::CoordinateFixup;
//!
//! let fixup = CoordinateFixup::YUpToZUp.matrix();
//! let up = fixup.transform_vector3(Vec3::Y);
//! assert_eq!(up, Vec3::Z);
//! ```
//!
//! [`AnimationPlayer`]: crate::AnimationPlayer

use glam::{Mat4, Vec4};

/// Axis remap applied as the last step of every skinning matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CoordinateFixup {
    /// Asset axes already match the engine
    #[default]
    Identity,
    /// Y-up asset into a Z-up engine: `x' = x`, `y' = -z`, `z' = y`
    YUpToZUp,
}

impl CoordinateFixup {
    /// The remap as a 4x4 matrix
    pub fn matrix(self) -> Mat4 {
        match self {
            Self::Identity => Mat4::IDENTITY,
            Self::YUpToZUp => Mat4::from_cols(
                Vec4::new(1.0, 0.0, 0.0, 0.0),
                Vec4::new(0.0, 0.0, 1.0, 0.0),
                Vec4::new(0.0, -1.0, 0.0, 0.0),
                Vec4::new(0.0, 0.0, 0.0, 1.0),
            ),
        }
    }
}

/// Float order of each 4x4 matrix in a flattened palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixLayout {
    /// Row-vector matrices stored row by row (translation in elements 12..15)
    #[default]
    RowMajor,
    /// Row-vector matrices stored column by column (translation in 3, 7, 11)
    ColumnMajor,
}

impl MatrixLayout {
    /// Flatten one matrix into 16 floats
    pub fn flatten(self, matrix: &Mat4) -> [f32; 16] {
        match self {
            // glam column-major == row-vector row-major
            Self::RowMajor => matrix.to_cols_array(),
            Self::ColumnMajor => matrix.transpose().to_cols_array(),
        }
    }

    /// Flatten a run of matrices back to back
    pub fn flatten_all(self, matrices: &[Mat4]) -> Vec<f32> {
        let mut data = Vec::with_capacity(matrices.len() * 16);
        for matrix in matrices {
            data.extend_from_slice(&self.flatten(matrix));
        }
        data
    }
}
