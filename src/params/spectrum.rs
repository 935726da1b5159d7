//! Wave spectrum parameters (wind, wave age, layer sizes).

use std::f64::consts::PI;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{OceanError, Result};

/// Largest Fourier grid the transform path supports.
///
/// The butterfly lookup on the GPU side is stored at 8-bit precision, so the
/// grid cannot grow past 256 cells per side.
pub const MAX_FOURIER_SIZE: usize = 256;

/// Number of wavelength layers sampled from the spectrum.
pub const LAYER_COUNT: usize = 4;

/// Statistical wind-wave parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumConfig {
    /// Fourier grid resolution N (cells per side, power of two, at most 256)
    pub size: usize,

    /// Wind speed 10 m above the surface (meters per second, > 0)
    /// Higher values give greater swell.
    pub wind_speed_m_per_s: f32,

    /// Output height scale (dimensionless, >= 0)
    pub wave_amplitude: f32,

    /// Inverse wave age `omega` (dimensionless, > 0)
    /// Lower values mean a more developed sea with longer, larger swell.
    pub inverse_wave_age: f32,

    /// Patch size of each layer (meters, largest to smallest wavelength)
    pub grid_sizes_m: [f32; LAYER_COUNT],

    /// Horizontal displacement strength per layer (dimensionless)
    pub choppiness: [f32; LAYER_COUNT],

    /// Seed for the random phases (0 reproduces the canonical spectrum)
    pub seed: u64,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            size: 128,
            wind_speed_m_per_s: 8.0,
            wave_amplitude: 1.0,
            inverse_wave_age: 0.84,
            grid_sizes_m: [5488.0, 392.0, 28.0, 2.0],
            choppiness: [2.3, 2.1, 1.3, 0.9],
            seed: 0,
        }
    }
}

impl SpectrumConfig {
    /// Resolution actually used for generation.
    ///
    /// Out-of-range sizes are not fatal: they are clamped to
    /// [`MAX_FOURIER_SIZE`] and rounded up to the next power of two, with a
    /// warning.
    pub fn corrected_resolution(&self) -> usize {
        let mut size = self.size;

        if size > MAX_FOURIER_SIZE {
            warn!(
                "Fourier grid size {} is greater than {}, using {}",
                size, MAX_FOURIER_SIZE, MAX_FOURIER_SIZE
            );
            size = MAX_FOURIER_SIZE;
        }

        if !size.is_power_of_two() {
            let next = size.next_power_of_two();
            warn!(
                "Fourier grid size {} is not a power of two, using {}",
                size, next
            );
            size = next;
        }

        size
    }

    /// Copy of this config with the resolution corrected.
    pub fn corrected(&self) -> Self {
        Self {
            size: self.corrected_resolution(),
            ..self.clone()
        }
    }

    /// Reject values that cannot be corrected in place.
    pub fn validate(&self) -> Result<()> {
        if !(self.wind_speed_m_per_s.is_finite() && self.wind_speed_m_per_s > 0.0) {
            return Err(OceanError::invalid(
                "wind_speed_m_per_s",
                format!("must be positive, got {}", self.wind_speed_m_per_s),
            ));
        }
        if !(self.wave_amplitude.is_finite() && self.wave_amplitude >= 0.0) {
            return Err(OceanError::invalid(
                "wave_amplitude",
                format!("must be non-negative, got {}", self.wave_amplitude),
            ));
        }
        if !(self.inverse_wave_age.is_finite() && self.inverse_wave_age > 0.0) {
            return Err(OceanError::invalid(
                "inverse_wave_age",
                format!("must be positive, got {}", self.inverse_wave_age),
            ));
        }
        if let Some(bad) = self
            .grid_sizes_m
            .iter()
            .find(|s| !(s.is_finite() && **s > 0.0))
        {
            return Err(OceanError::invalid(
                "grid_sizes_m",
                format!("every layer size must be positive, got {}", bad),
            ));
        }
        Ok(())
    }

    /// Per-layer `2π·N / gridSize` factor turning a normalized grid
    /// coordinate into a wavenumber (radians per meter).
    pub fn inverse_grid_sizes(&self, size: usize) -> [f64; LAYER_COUNT] {
        let factor = 2.0 * PI * size as f64;
        self.grid_sizes_m.map(|g| factor / g as f64)
    }
}
