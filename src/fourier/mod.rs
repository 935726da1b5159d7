//! Boundary to the batched inverse Fourier transform.
//!
//! The core only prepares Hermitian spectra and reads back real fields; the
//! transform itself sits behind [`TransformEngine`] so a GPU implementation
//! can replace the CPU reference one.

mod cpu;
mod field;
mod ping_pong;

pub use cpu::CpuFourier;
pub use field::SpectrumField;
pub use ping_pong::PingPong;

use crate::error::TransformError;

/// Most fields an engine accepts in one call.
pub const MAX_BATCH: usize = 5;

/// Batched in-place 2D inverse transform.
///
/// Given Hermitian-symmetric channels, every channel comes back real valued
/// at the same N×N resolution. Failures are reported, never retried here.
pub trait TransformEngine {
    /// Resolution the engine was built for.
    fn size(&self) -> usize;

    fn inverse_transform(&mut self, fields: &mut [SpectrumField]) -> Result<(), TransformError>;
}
