//! Camera pose consumed by the projection solver.

use glam::{Mat4, Vec3};

use crate::params::RenderConfig;

/// Squared cross-product length below which the up vector is treated as
/// parallel to the view direction.
const PARALLEL_EPSILON: f32 = 1e-12;

/// World-space camera pose with an OpenGL-style projection (clip z in [-1, 1])
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Unit view direction (zero when the pose is degenerate)
    pub forward: Vec3,
    pub up: Vec3,
    pub projection: Mat4,
}

impl Camera {
    pub fn new(position: Vec3, forward: Vec3, up: Vec3, projection: Mat4) -> Self {
        Self {
            position,
            forward: forward.normalize_or_zero(),
            up,
            projection,
        }
    }

    /// Camera at `position` looking at `target` with Y up.
    pub fn looking_at(position: Vec3, target: Vec3, render: &RenderConfig) -> Self {
        Self::new(position, target - position, Vec3::Y, Self::perspective(render))
    }

    pub fn perspective(render: &RenderConfig) -> Mat4 {
        Mat4::perspective_rh_gl(
            render.fov_degrees.to_radians(),
            render.aspect_ratio(),
            render.near_plane_m,
            render.far_plane_m,
        )
    }

    /// World-to-camera matrix.
    pub fn view(&self) -> Mat4 {
        look_to(self.position, self.forward, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view()
    }
}

/// Right-handed view matrix looking from `eye` towards `target`.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    look_to(eye, target - eye, up)
}

/// Right-handed view matrix looking from `eye` along `dir`.
///
/// A zero direction yields the identity. An up vector parallel to the view
/// direction is replaced by an orthonormal one so the basis never collapses.
pub fn look_to(eye: Vec3, dir: Vec3, up: Vec3) -> Mat4 {
    let Some(forward) = dir.try_normalize() else {
        return Mat4::IDENTITY;
    };

    let up = if forward.cross(up).length_squared() < PARALLEL_EPSILON {
        forward.any_orthonormal_vector()
    } else {
        up
    };

    Mat4::look_to_rh(eye, forward, up)
}
