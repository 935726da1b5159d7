//! Projected-grid parameters (ocean plane and wave band).

use serde::{Deserialize, Serialize};

/// Where the ocean plane sits and how far waves leave it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// World Y of the plane the grid is projected onto (meters)
    pub ocean_level_m: f32,

    /// Expected wave amplitude band around the plane (meters, >= 0)
    /// The range correction widens the projection by this much so displaced
    /// waves never pull the grid away from the screen edges.
    pub max_height_m: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            ocean_level_m: 0.0,
            max_height_m: 10.0,
        }
    }
}
