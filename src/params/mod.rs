//! Parameter definitions with physical units and documented semantics.
//!
//! All tunable numbers live here with:
//! - Physical units (meters, seconds, etc.)
//! - Documented ranges and meanings
//! - Defaults that reproduce the canonical sea state

mod camera;
mod projection;
mod render;
mod spectrum;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

// Re-export all types
pub use camera::{CameraPreset, FixedCamera, FlyoverCamera};
pub use projection::ProjectionConfig;
pub use render::RenderConfig;
pub use spectrum::{SpectrumConfig, LAYER_COUNT, MAX_FOURIER_SIZE};

/// Complete configuration surface, loadable from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OceanConfig {
    pub spectrum: SpectrumConfig,
    pub projection: ProjectionConfig,
    pub render: RenderConfig,
    pub camera: CameraPreset,
}

impl OceanConfig {
    /// Load a config file; missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
