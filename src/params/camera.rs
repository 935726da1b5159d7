//! Camera path configuration and presets.

use serde::{Deserialize, Serialize};

/// Straight-line flight at constant altitude
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyoverCamera {
    /// Constant altitude (meters, may be negative to fly underwater)
    pub altitude_m: f32,

    /// Forward movement speed along +Z (meters per second)
    pub forward_speed_m_per_s: f32,

    /// Look-ahead distance (meters)
    pub look_ahead_m: f32,

    /// Target height as a fraction of the altitude (0 = look at the plane)
    pub target_altitude_fraction: f32,
}

impl Default for FlyoverCamera {
    fn default() -> Self {
        Self {
            altitude_m: 30.0,
            forward_speed_m_per_s: 15.0,
            look_ahead_m: 150.0,
            target_altitude_fraction: 0.6,
        }
    }
}

/// Stationary camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedCamera {
    /// Camera position (meters)
    pub position: [f32; 3],

    /// Look-at target (meters)
    pub target: [f32; 3],
}

impl Default for FixedCamera {
    fn default() -> Self {
        Self {
            position: [0.0, 20.0, 0.0],
            target: [0.0, 0.0, 100.0],
        }
    }
}

/// Camera preset selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CameraPreset {
    /// Stationary view
    Fixed(FixedCamera),

    /// Straight-line flight looking ahead and down
    Flyover(FlyoverCamera),
}

impl Default for CameraPreset {
    fn default() -> Self {
        Self::Fixed(FixedCamera::default())
    }
}
