//! Wave spectrum: statistical model, layered sampling, dispersion lookup and
//! per-frame time evolution.

mod dispersion;
mod evolver;
mod generator;
mod model;

// Re-export public types
pub use dispersion::{DispersionGrid, DispersionTable};
pub use evolver::{
    empty_fields, EvolvedSpectrum, SpectrumEvolver, DISPLACEMENT_FIELD_01, DISPLACEMENT_FIELD_23,
    FIELD_COUNT, HEIGHT_FIELD, SLOPE_FIELD_01, SLOPE_FIELD_23,
};
pub use generator::{SpectralGrid, SpectrumGenerator, VarianceCorrection};
pub use model::{dispersion, SpectrumModel, GRAVITY, WAVE_CM, WAVE_KM};
