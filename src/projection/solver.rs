//! Per-frame projector solve: aim, range correction, interpolation basis.

use glam::{Mat4, Vec3, Vec4};

use super::camera::{look_at, Camera};
use super::range::{band_points, frustum_corners, range_from_points};
use crate::params::ProjectionConfig;

/// Clearance kept between the projector and the wave band (meters)
const BAND_CLEARANCE_M: f32 = 5.0;

/// Distance along the camera forward vector used to place the look-at target
const LOOK_AHEAD_M: f32 = 50.0;

/// Smallest half-thickness of the range band (meters)
const MIN_RANGE_M: f32 = 1.0;

/// Unit-quad corners in the order the interpolation rows are stored
const QUAD_CORNERS: [(f32, f32); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

/// Everything the rendering boundary needs to draw the projected grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionState {
    pub ocean_level: f32,
    pub max_height: f32,

    /// Camera is below the ocean plane, triangle winding is inverted
    pub is_flipped: bool,

    /// Re-aimed projector position (never inside the wave band)
    pub aimed_position: Vec3,

    /// Screen-bounds correction (identity when nothing is visible)
    pub range: Mat4,

    /// `range⁻¹ × projection × aimed view`
    pub projector_vp: Mat4,

    /// Rows are homogeneous world positions of the unit-quad corners
    /// (0,0), (1,0), (1,1), (0,1) on the ocean plane.
    pub interpolation: Mat4,

    /// False when no part of the wave band is inside the camera frustum
    pub visible: bool,
}

impl ProjectionState {
    /// Interpolation row for quad corner `i`.
    pub fn corner(&self, i: usize) -> Vec4 {
        self.interpolation.row(i)
    }
}

/// Projector re-aimed so its view never degenerates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimedProjector {
    pub position: Vec3,
    pub view: Mat4,
    pub is_flipped: bool,
}

/// Clamp the camera out of the wave band and aim it at the ocean plane.
pub fn aim_projector(camera: &Camera, ocean_level: f32, max_height: f32) -> AimedProjector {
    let band = max_height.max(0.0) + BAND_CLEARANCE_M;
    let is_flipped = camera.position.y < ocean_level;

    let mut position = camera.position;
    if is_flipped {
        position.y = position.y.min(ocean_level - band);
    } else {
        position.y = position.y.max(ocean_level + band);
    }

    let mut target = position + camera.forward * LOOK_AHEAD_M;
    target.y = ocean_level;

    AimedProjector {
        position,
        view: look_at(position, target, Vec3::Y),
        is_flipped,
    }
}

/// Rows of the interpolation matrix: where each quad corner's view ray hits
/// the plane `y = level`, in homogeneous coordinates.
///
/// `inverse_projector` maps range-corrected screen space back to world space.
pub fn interpolation_basis(inverse_projector: Mat4, level: f32) -> Mat4 {
    let rows = QUAD_CORNERS.map(|(x, y)| {
        let a = inverse_projector * Vec4::new(x, y, -1.0, 1.0);
        let b = inverse_projector * Vec4::new(x, y, 1.0, 1.0);
        let ab = b - a;

        let denom = ab.y - ab.w * level;
        let t = if denom != 0.0 {
            (a.w * level - a.y) / denom
        } else {
            0.0
        };
        a + ab * t
    });

    Mat4::from_cols(rows[0], rows[1], rows[2], rows[3]).transpose()
}

/// Recomputes the projector from scratch every frame
#[derive(Debug, Clone)]
pub struct ProjectionSolver {
    config: ProjectionConfig,
    state: ProjectionState,
}

impl ProjectionSolver {
    pub fn new(config: &ProjectionConfig) -> Self {
        Self {
            config: config.clone(),
            state: ProjectionState {
                ocean_level: config.ocean_level_m,
                max_height: config.max_height_m,
                is_flipped: false,
                aimed_position: Vec3::ZERO,
                range: Mat4::IDENTITY,
                projector_vp: Mat4::IDENTITY,
                interpolation: Mat4::IDENTITY,
                visible: false,
            },
        }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Last solved state.
    pub fn state(&self) -> &ProjectionState {
        &self.state
    }

    pub fn update(&mut self, camera: &Camera) -> &ProjectionState {
        let level = self.config.ocean_level_m;
        let max_height = self.config.max_height_m;

        let aimed = aim_projector(camera, level, max_height);
        let aimed_vp = camera.projection * aimed.view;

        // Frustum of what the camera actually sees.
        let corners = frustum_corners(camera.view_proj().inverse());
        let points = band_points(&corners, level, max_height.max(MIN_RANGE_M));

        let (range, visible) = match range_from_points(&points, aimed_vp, level) {
            Some(range) => (range, true),
            None => {
                log::debug!(
                    "Ocean not visible from {:?} ({} band points), using identity range",
                    camera.position,
                    points.len()
                );
                (Mat4::IDENTITY, false)
            }
        };

        let projector_vp = range.inverse() * aimed_vp;
        let interpolation = interpolation_basis(aimed_vp.inverse() * range, level);

        self.state = ProjectionState {
            ocean_level: level,
            max_height,
            is_flipped: aimed.is_flipped,
            aimed_position: aimed.position,
            range,
            projector_vp,
            interpolation,
            visible,
        };
        &self.state
    }
}
