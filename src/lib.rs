//! swellgrid library - spectral ocean waves on a projected grid

pub mod camera;
pub mod cli;
pub mod error;
pub mod fourier;
pub mod grid;
pub mod ocean;
pub mod params;
pub mod projection;
pub mod rendering;
pub mod spectrum;
