use std::f64::consts::TAU;

use glam::{DVec2, DVec3};

/// Added to the projection divisor so a vertex sitting exactly at the
/// viewer does not divide by zero.
pub const PROJECTION_EPSILON: f64 = 1e-5;

/// Rotates `v` about X, then Y, then Z.
///
/// Each step works on the output of the previous one; this is not the same
/// as applying a single combined rotation matrix built from the three angles.
pub fn rotate(v: DVec3, angle_x: f64, angle_y: f64, angle_z: f64) -> DVec3 {
    let DVec3 { mut x, mut y, mut z } = v;

    let (sin, cos) = angle_x.sin_cos();
    (y, z) = (y * cos - z * sin, y * sin + z * cos);

    let (sin, cos) = angle_y.sin_cos();
    (x, z) = (x * cos + z * sin, -x * sin + z * cos);

    let (sin, cos) = angle_z.sin_cos();
    (x, y) = (x * cos - y * sin, x * sin + y * cos);

    DVec3::new(x, y, z)
}

/// Scales x and y by `fov / (viewer_distance + z + ε)`. The returned z is the
/// unprojected depth, kept for sorting.
pub fn project(v: DVec3, fov: f64, viewer_distance: f64) -> (DVec2, f64) {
    let factor = fov / (viewer_distance + v.z + PROJECTION_EPSILON);
    (DVec2::new(v.x * factor, v.y * factor), v.z)
}

/// Per-tick angle increments in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationStep {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for RotationStep {
    fn default() -> Self {
        Self {
            x: 0.02,
            y: 0.015,
            z: 0.01,
        }
    }
}

/// Current Euler angles of the model, in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn apply(&self, v: DVec3) -> DVec3 {
        rotate(v, self.x, self.y, self.z)
    }

    /// Next state after one tick. With `wrap` set every angle is reduced into [0, 2π).
    pub fn advanced(self, step: RotationStep, wrap: bool) -> Self {
        let next = Self::new(self.x + step.x, self.y + step.y, self.z + step.z);
        if wrap {
            next.wrapped()
        } else {
            next
        }
    }

    pub fn wrapped(self) -> Self {
        Self::new(self.x.rem_euclid(TAU), self.y.rem_euclid(TAU), self.z.rem_euclid(TAU))
    }
}
