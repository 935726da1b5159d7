//! Complex spectral fields exchanged with the transform engine.

use rustfft::num_complex::Complex32;

/// N×N grid of two complex channels, the CPU stand-in for one RGBA float
/// texture. Cell `(x, y)` lives at index `x + y * size`.
///
/// After an inverse transform of a Hermitian input, the real and imaginary
/// part of each channel each carry one real spatial field.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumField {
    size: usize,
    data: Vec<[Complex32; 2]>,
}

impl SpectrumField {
    pub fn zeroed(size: usize) -> Self {
        Self {
            size,
            data: vec![[Complex32::new(0.0, 0.0); 2]; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> [Complex32; 2] {
        self.data[x + y * self.size]
    }

    pub fn set(&mut self, x: usize, y: usize, value: [Complex32; 2]) {
        self.data[x + y * self.size] = value;
    }

    pub fn cells(&self) -> &[[Complex32; 2]] {
        &self.data
    }

    pub fn cells_mut(&mut self) -> &mut [[Complex32; 2]] {
        &mut self.data
    }

    /// Cell flattened to `(re0, im0, re1, im1)`.
    pub fn texel(&self, idx: usize) -> [f32; 4] {
        let [a, b] = self.data[idx];
        [a.re, a.im, b.re, b.im]
    }
}
