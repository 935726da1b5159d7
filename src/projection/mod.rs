//! Projected-grid solver.
//!
//! Each frame a camera pose is turned into a projector that maps a fixed
//! screen-aligned grid onto the ocean plane, widened so displaced waves stay
//! covered up to the screen edges.

mod camera;
mod range;
mod solver;

pub use camera::{look_at, look_to, Camera};
pub use range::{band_points, frustum_corners, range_from_points, segment_plane_intersection};
pub use solver::{
    aim_projector, interpolation_basis, AimedProjector, ProjectionSolver, ProjectionState,
};
