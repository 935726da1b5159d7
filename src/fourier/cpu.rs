//! Reference inverse transform on the CPU.

use std::sync::Arc;

use rustfft::{num_complex::Complex32, Fft, FftPlanner};

use super::{SpectrumField, TransformEngine, MAX_BATCH};
use crate::error::TransformError;

/// Batched 2D inverse FFT built on `rustfft`.
///
/// Unnormalised: output(x) = Σ_k input(k)·e^{+2πi k·x / N}, matching the
/// GPU butterfly passes the spectrum amplitudes are scaled for.
pub struct CpuFourier {
    size: usize,
    fft: Arc<dyn Fft<f32>>,
    work: Vec<Complex32>,
    transposed: Vec<Complex32>,
}

impl CpuFourier {
    pub fn new(size: usize) -> Result<Self, TransformError> {
        if !size.is_power_of_two() {
            return Err(TransformError::NotPowerOfTwo(size));
        }

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_inverse(size);

        Ok(Self {
            size,
            fft,
            work: vec![Complex32::new(0.0, 0.0); size * size],
            transposed: vec![Complex32::new(0.0, 0.0); size * size],
        })
    }

    /// Rows, then columns through a transpose.
    fn transform_channel(&mut self, field: &mut SpectrumField, channel: usize) {
        let n = self.size;

        for (dst, cell) in self.work.iter_mut().zip(field.cells()) {
            *dst = cell[channel];
        }

        self.fft.process(&mut self.work);
        transpose(&self.work, &mut self.transposed, n);
        self.fft.process(&mut self.transposed);
        transpose(&self.transposed, &mut self.work, n);

        for (cell, src) in field.cells_mut().iter_mut().zip(&self.work) {
            cell[channel] = *src;
        }
    }
}

impl TransformEngine for CpuFourier {
    fn size(&self) -> usize {
        self.size
    }

    fn inverse_transform(&mut self, fields: &mut [SpectrumField]) -> Result<(), TransformError> {
        if fields.len() > MAX_BATCH {
            return Err(TransformError::BatchTooLarge {
                limit: MAX_BATCH,
                actual: fields.len(),
            });
        }
        if let Some(bad) = fields.iter().find(|f| f.size() != self.size) {
            return Err(TransformError::SizeMismatch {
                expected: self.size,
                actual: bad.size(),
            });
        }

        for field in fields.iter_mut() {
            self.transform_channel(field, 0);
            self.transform_channel(field, 1);
        }
        Ok(())
    }
}

fn transpose(src: &[Complex32], dst: &mut [Complex32], n: usize) {
    for y in 0..n {
        for x in 0..n {
            dst[y + x * n] = src[x + y * n];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_rejects_non_power_of_two() {
        assert_eq!(
            CpuFourier::new(12).err(),
            Some(TransformError::NotPowerOfTwo(12))
        );
    }

    #[test]
    fn test_rejects_mismatched_field() {
        let mut engine = CpuFourier::new(8).unwrap();
        let mut fields = vec![SpectrumField::zeroed(16)];
        assert_eq!(
            engine.inverse_transform(&mut fields),
            Err(TransformError::SizeMismatch {
                expected: 8,
                actual: 16
            })
        );
    }

    #[test]
    fn test_rejects_oversized_batch() {
        let mut engine = CpuFourier::new(4).unwrap();
        let mut fields: Vec<_> = (0..6).map(|_| SpectrumField::zeroed(4)).collect();
        assert!(matches!(
            engine.inverse_transform(&mut fields),
            Err(TransformError::BatchTooLarge { limit: 5, actual: 6 })
        ));
    }

    #[test]
    fn test_hermitian_input_gives_real_cosine() {
        let n = 16;
        let mut engine = CpuFourier::new(n).unwrap();
        let mut field = SpectrumField::zeroed(n);

        // H(1, 0) = a, H(-1, 0) = conj(a)
        let a = Complex32::new(0.5, 0.25);
        field.set(1, 0, [a, Complex32::new(0.0, 0.0)]);
        field.set(n - 1, 0, [a.conj(), Complex32::new(0.0, 0.0)]);

        let mut fields = [field];
        engine.inverse_transform(&mut fields).unwrap();

        let phase0 = a.im.atan2(a.re);
        for y in 0..n {
            for x in 0..n {
                let [out, other] = fields[0].get(x, y);
                let expected = 2.0 * a.norm() * (2.0 * PI * x as f32 / n as f32 + phase0).cos();
                assert!((out.re - expected).abs() < 1e-5, "({}, {})", x, y);
                assert!(out.im.abs() < 1e-5);
                assert!(other.norm() < 1e-6);
            }
        }
    }

    #[test]
    fn test_dc_term_spreads_evenly() {
        let n = 8;
        let mut engine = CpuFourier::new(n).unwrap();
        let mut field = SpectrumField::zeroed(n);
        field.set(0, 0, [Complex32::new(0.0, 0.0), Complex32::new(3.0, -1.0)]);

        let mut fields = [field];
        engine.inverse_transform(&mut fields).unwrap();
        for cell in fields[0].cells() {
            assert!((cell[1] - Complex32::new(3.0, -1.0)).norm() < 1e-6);
        }
    }
}
