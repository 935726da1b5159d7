//! Data handed across the rendering boundary.

use bytemuck::{Pod, Zeroable};

use crate::grid::CullMode;
use crate::params::SpectrumConfig;
use crate::projection::ProjectionState;

/// Uniform block for the ocean shader (projector + wave parameters)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct OceanUniforms {
    pub projector_vp: [[f32; 4]; 4],
    pub interpolation: [[f32; 4]; 4],
    /// Patch size of each wave layer (meters)
    pub grid_sizes: [f32; 4],
    pub choppiness: [f32; 4],
    pub ocean_level: f32,
    /// 1 when front faces must be culled (camera below the plane)
    pub cull_front: u32,
    /// Slope variance the sampled spectrum misses, for the BRDF lookup
    pub variance_delta: f32,
    pub time: f32,
}

impl OceanUniforms {
    pub fn new(
        projection: &ProjectionState,
        spectrum: &SpectrumConfig,
        variance_delta: f64,
        time_s: f32,
    ) -> Self {
        Self {
            projector_vp: projection.projector_vp.to_cols_array_2d(),
            interpolation: projection.interpolation.to_cols_array_2d(),
            grid_sizes: spectrum.grid_sizes_m,
            choppiness: spectrum.choppiness,
            ocean_level: projection.ocean_level,
            cull_front: (Self::cull_mode_of(projection) == CullMode::Front) as u32,
            variance_delta: variance_delta as f32,
            time: time_s,
        }
    }

    fn cull_mode_of(projection: &ProjectionState) -> CullMode {
        CullMode::for_flip(projection.is_flipped)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
