//! Interpolation helpers over glam types
//!
//! All composition in this crate is written in glam's column-vector order.
//! A row-vector product `A * B` (apply `A` first) is therefore written
//! `B * A` here, and the resulting matrices are the transposes of their
//! row-vector counterparts. glam stores them column-major, which is
//! byte-for-byte the row-major layout a row-vector renderer expects.

use glam::{Mat4, Quat, Vec3};

/// Below this distance from 1.0, `|dot|` is treated as a zero angle by [`slerp`]
pub const SLERP_EPSILON: f32 = 1e-6;

/// Component-wise linear interpolation, `a * (1 - t) + b * t`
pub fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}

/// Spherical linear interpolation between two rotations
///
/// Takes the shortest arc: when the quaternions point into opposite
/// hemispheres the first operand is negated before blending. When the angle
/// between them is zero, `q1` is returned unmodified.
pub fn slerp(q1: Quat, q2: Quat, t: f32) -> Quat {
    let dot = q1.dot(q2);

    // If dot < 0, negate the start to take the shorter arc
    let (start, dot) = if dot < 0.0 { (-q1, -dot) } else { (q1, dot) };

    if dot >= 1.0 - SLERP_EPSILON {
        return q1;
    }

    let theta = dot.clamp(-1.0, 1.0).acos();
    let sin_theta = theta.sin();
    let s0 = ((1.0 - t) * theta).sin() / sin_theta;
    let s1 = (t * theta).sin() / sin_theta;

    (start * s0 + q2 * s1).normalize()
}

/// Build a bone-local transform from its interpolated components
///
/// Row-vector order `Scale * Rotation * Translation`.
pub fn local_transform(scale: Vec3, rotation: Quat, translation: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(scale, rotation, translation)
}
