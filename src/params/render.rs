//! Rendering-boundary configuration (viewport, lens, screen grid density).

use serde::{Deserialize, Serialize};

/// Rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Viewport width (pixels)
    pub window_width: u32,

    /// Viewport height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (meters)
    pub near_plane_m: f32,

    /// Far clipping plane (meters)
    pub far_plane_m: f32,

    /// Screen pixels covered by one projected-grid quad
    /// Higher means fewer vertices.
    pub pixels_per_quad: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 60.0,
            near_plane_m: 0.3,
            far_plane_m: 1000.0,
            pixels_per_quad: 8,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}
