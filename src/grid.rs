//! Screen-aligned projected grid.
//!
//! The mesh never moves: its vertices are uv coordinates in [0,1]² and the
//! vertex stage places them on the ocean through the projector's
//! interpolation basis.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::error::{OceanError, Result};
use crate::params::RenderConfig;

/// Most vertices a single grid may hold (16-bit index friendly)
pub const MAX_GRID_VERTICES: usize = 65_000;

/// Projected grid vertex (screen-space uv only)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GridVertex {
    pub uv: [f32; 2],
}

/// Face culling for the projected grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    Back,
    Front,
}

impl CullMode {
    /// Viewed from below the plane the winding inverts.
    pub fn for_flip(is_flipped: bool) -> Self {
        if is_flipped {
            Self::Front
        } else {
            Self::Back
        }
    }
}

/// Fixed screen-space mesh, one quad per `pixels_per_quad` pixels
#[derive(Debug, Clone)]
pub struct ScreenGrid {
    pub vertices: Vec<GridVertex>,
    pub indices: Vec<u32>,
    columns: usize,
    rows: usize,
}

impl ScreenGrid {
    pub fn new(width: u32, height: u32, pixels_per_quad: u32) -> Result<Self> {
        if pixels_per_quad == 0 {
            return Err(OceanError::invalid(
                "pixels_per_quad",
                "must be at least one pixel",
            ));
        }
        if width == 0 || height == 0 {
            return Err(OceanError::invalid("viewport", "width and height must be positive"));
        }

        let columns = width.div_ceil(pixels_per_quad) as usize;
        let rows = height.div_ceil(pixels_per_quad) as usize;
        let vertex_count = (columns + 1) * (rows + 1);
        if vertex_count > MAX_GRID_VERTICES {
            return Err(OceanError::GridTooDense {
                vertices: vertex_count,
                limit: MAX_GRID_VERTICES,
            });
        }

        let mut vertices = Vec::with_capacity(vertex_count);
        for y in 0..=rows {
            for x in 0..=columns {
                vertices.push(GridVertex {
                    uv: [x as f32 / columns as f32, y as f32 / rows as f32],
                });
            }
        }

        // Counter-clockwise winding seen from above the plane
        let mut indices = Vec::with_capacity(columns * rows * 6);
        for y in 0..rows {
            for x in 0..columns {
                let bottom_left = (y * (columns + 1) + x) as u32;
                let bottom_right = bottom_left + 1;
                let top_left = ((y + 1) * (columns + 1) + x) as u32;
                let top_right = top_left + 1;

                indices.extend_from_slice(&[
                    bottom_left,
                    bottom_right,
                    top_left,
                    top_left,
                    bottom_right,
                    top_right,
                ]);
            }
        }

        Ok(Self {
            vertices,
            indices,
            columns,
            rows,
        })
    }

    pub fn from_render_config(render: &RenderConfig) -> Result<Self> {
        Self::new(
            render.window_width,
            render.window_height,
            render.pixels_per_quad,
        )
    }

    /// Quads along x and y.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// World position of a grid vertex on the ocean plane.
///
/// Bilinear interpolation of the homogeneous interpolation rows, then the
/// perspective divide. `None` when the point lands at infinity.
pub fn reconstruct_world(interpolation: &Mat4, uv: Vec2) -> Option<Vec3> {
    let bottom = interpolation.row(0).lerp(interpolation.row(1), uv.x);
    let top = interpolation.row(3).lerp(interpolation.row(2), uv.x);
    let p = bottom.lerp(top, uv.y);

    if p.w == 0.0 {
        return None;
    }
    let world = p.truncate() / p.w;
    world.is_finite().then_some(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_grid_dimensions() {
        let grid = ScreenGrid::new(1280, 720, 8).unwrap();
        assert_eq!(grid.dimensions(), (160, 90));
        assert_eq!(grid.vertices.len(), 161 * 91);
        assert_eq!(grid.indices.len(), 160 * 90 * 6);
        assert_eq!(grid.vertices.first().unwrap().uv, [0.0, 0.0]);
        assert_eq!(grid.vertices.last().unwrap().uv, [1.0, 1.0]);
    }

    #[test]
    fn test_partial_quads_round_up() {
        let grid = ScreenGrid::new(10, 5, 4).unwrap();
        assert_eq!(grid.dimensions(), (3, 2));
    }

    #[test]
    fn test_indices_in_bounds() {
        let grid = ScreenGrid::new(64, 32, 4).unwrap();
        let count = grid.vertices.len() as u32;
        assert!(grid.indices.iter().all(|&i| i < count));
        assert_eq!(grid.index_bytes().len(), grid.indices.len() * 4);
        assert_eq!(grid.vertex_bytes().len(), grid.vertices.len() * 8);
    }

    #[test]
    fn test_rejects_dense_grid() {
        assert!(matches!(
            ScreenGrid::new(1920, 1080, 1),
            Err(OceanError::GridTooDense { limit: MAX_GRID_VERTICES, .. })
        ));
        assert!(matches!(
            ScreenGrid::new(100, 100, 0),
            Err(OceanError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_cull_mode_follows_flip() {
        assert_eq!(CullMode::for_flip(false), CullMode::Back);
        assert_eq!(CullMode::for_flip(true), CullMode::Front);
    }

    #[test]
    fn test_reconstruct_interpolates_homogeneous_rows() {
        // Corners of a 10 m square at y = 0, with differing w
        let rows = [
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::new(20.0, 0.0, 0.0, 2.0),
            Vec4::new(10.0, 0.0, 10.0, 1.0),
            Vec4::new(0.0, 0.0, 20.0, 2.0),
        ];
        let interpolation = Mat4::from_cols(rows[0], rows[1], rows[2], rows[3]).transpose();

        let corner = reconstruct_world(&interpolation, Vec2::new(1.0, 0.0)).unwrap();
        assert!((corner - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);

        let far = reconstruct_world(&interpolation, Vec2::new(1.0, 1.0)).unwrap();
        assert!((far - Vec3::new(10.0, 0.0, 10.0)).length() < 1e-5);

        let mid = reconstruct_world(&interpolation, Vec2::splat(0.5)).unwrap();
        assert!(mid.y.abs() < 1e-6);
    }

    #[test]
    fn test_reconstruct_at_infinity() {
        assert_eq!(reconstruct_world(&Mat4::ZERO, Vec2::new(0.3, 0.7)), None);
    }
}
