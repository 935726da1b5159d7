//! Demo camera paths producing camera poses over time.

use glam::Vec3;

use crate::params::{CameraPreset, FixedCamera, FlyoverCamera, RenderConfig};
use crate::projection::Camera;

/// Camera system driven by a preset path
pub struct CameraSystem {
    preset: CameraPreset,
}

impl CameraSystem {
    /// Create new camera system with specified preset
    pub fn new(preset: CameraPreset) -> Self {
        Self { preset }
    }

    /// Compute camera position and look-at target for given time
    ///
    /// # Returns
    /// Tuple of (eye_position, target_position)
    pub fn compute_position_and_target(&self, time_s: f32) -> (Vec3, Vec3) {
        match &self.preset {
            CameraPreset::Fixed(params) => Self::compute_fixed_path(params),
            CameraPreset::Flyover(params) => Self::compute_flyover_path(params, time_s),
        }
    }

    fn compute_fixed_path(p: &FixedCamera) -> (Vec3, Vec3) {
        (Vec3::from_array(p.position), Vec3::from_array(p.target))
    }

    /// Straight line along +Z at constant altitude
    fn compute_flyover_path(p: &FlyoverCamera, time_s: f32) -> (Vec3, Vec3) {
        let eye = Vec3::new(0.0, p.altitude_m, time_s * p.forward_speed_m_per_s);

        // Ahead and below eye level, so the ocean fills the lower screen
        let target = Vec3::new(
            0.0,
            p.altitude_m * p.target_altitude_fraction,
            eye.z + p.look_ahead_m,
        );

        (eye, target)
    }

    /// Camera pose for the projection solver at `time_s`.
    pub fn camera_at(&self, time_s: f32, render_config: &RenderConfig) -> Camera {
        let (eye, target) = self.compute_position_and_target(time_s);
        Camera::looking_at(eye, target, render_config)
    }
}
