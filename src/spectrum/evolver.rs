//! Per-frame phase advance of the static spectrum and assembly of the
//! transform inputs.

use rustfft::num_complex::Complex32;

use super::dispersion::{normalized_coord, DispersionGrid};
use super::generator::SpectralGrid;
use crate::error::TransformError;
use crate::fourier::SpectrumField;
use crate::params::{SpectrumConfig, LAYER_COUNT};

/// Number of fields handed to the transform engine each frame.
pub const FIELD_COUNT: usize = 5;

/// Heights of layers 0..3.
pub const HEIGHT_FIELD: usize = 0;
/// Slopes of layers 0 and 1.
pub const SLOPE_FIELD_01: usize = 1;
/// Slopes of layers 2 and 3.
pub const SLOPE_FIELD_23: usize = 2;
/// Horizontal displacement of layers 0 and 1.
pub const DISPLACEMENT_FIELD_01: usize = 3;
/// Horizontal displacement of layers 2 and 3.
pub const DISPLACEMENT_FIELD_23: usize = 4;

/// Static amplitudes rotated to time `t`, one grid per layer.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolvedSpectrum {
    size: usize,
    time_s: f32,
    layers: [Vec<Complex32>; LAYER_COUNT],
}

impl EvolvedSpectrum {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn time_s(&self) -> f32 {
        self.time_s
    }

    pub fn amplitude(&self, x: usize, y: usize, layer: usize) -> Complex32 {
        self.layers[layer][x + y * self.size]
    }
}

/// Advances the spectrum in time and builds the Hermitian transform inputs
#[derive(Debug, Clone)]
pub struct SpectrumEvolver {
    size: usize,
    /// Wave vector of every cell, per layer
    wave_vectors: [Vec<[f32; 2]>; LAYER_COUNT],
}

impl SpectrumEvolver {
    /// Sized at the corrected resolution of `config`.
    pub fn new(config: &SpectrumConfig) -> Self {
        let size = config.corrected_resolution();
        let inverse_grid_sizes = config.inverse_grid_sizes(size);

        let wave_vectors = std::array::from_fn(|layer| {
            let mut vectors = vec![[0.0; 2]; size * size];
            for y in 0..size {
                for x in 0..size {
                    let (sx, sy) = normalized_coord(x, y, size);
                    vectors[x + y * size] = [
                        (sx * inverse_grid_sizes[layer]) as f32,
                        (sy * inverse_grid_sizes[layer]) as f32,
                    ];
                }
            }
            vectors
        });

        Self { size, wave_vectors }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Rotate every amplitude by `ω·t`, leaving its magnitude untouched.
    ///
    /// Both inputs must have been built at this evolver's resolution.
    pub fn evolve(
        &self,
        spectrum: &SpectralGrid,
        dispersion: &DispersionGrid,
        time_s: f32,
    ) -> Result<EvolvedSpectrum, TransformError> {
        let size = self.size;
        self.check_size(spectrum.size())?;
        self.check_size(dispersion.size())?;

        let layers = std::array::from_fn(|layer| {
            let mut rotated = Vec::with_capacity(size * size);
            for y in 0..size {
                for x in 0..size {
                    let phase = dispersion.omega(x, y, layer) as f64 * time_s as f64;
                    let (s, c) = phase.sin_cos();
                    let rotation = Complex32::new(c as f32, s as f32);
                    rotated.push(spectrum.amplitude(x, y, layer) * rotation);
                }
            }
            rotated
        });

        Ok(EvolvedSpectrum {
            size,
            time_s,
            layers,
        })
    }

    /// Fill the five transform inputs from an evolved spectrum.
    ///
    /// Each layer becomes `H(k) = R(k) + conj(R(-k))`, which is Hermitian, so
    /// pairs of real fields can share one complex channel as `a + i·b`.
    pub fn compose(
        &self,
        evolved: &EvolvedSpectrum,
        fields: &mut [SpectrumField; FIELD_COUNT],
    ) -> Result<(), TransformError> {
        self.check_size(evolved.size())?;
        for field in fields.iter() {
            self.check_size(field.size())?;
        }

        let n = self.size;
        let i = Complex32::new(0.0, 1.0);
        let zero = Complex32::new(0.0, 0.0);

        for y in 0..n {
            for x in 0..n {
                let idx = x + y * n;
                let mirror = (n - x) % n + ((n - y) % n) * n;

                let mut heights = [zero; LAYER_COUNT];
                let mut slopes = [zero; LAYER_COUNT];
                let mut displacements = [zero; LAYER_COUNT];

                for layer in 0..LAYER_COUNT {
                    let r = &evolved.layers[layer];
                    let h = r[idx] + r[mirror].conj();
                    let [kx, ky] = self.wave_vectors[layer][idx];
                    let k = (kx * kx + ky * ky).sqrt();

                    // i·kx·h - ky·h: x slope in the real part, y slope in the imaginary
                    let slope = h * Complex32::new(-ky, kx);

                    heights[layer] = h;
                    slopes[layer] = slope;
                    displacements[layer] = if k > 0.0 { slope / k } else { zero };
                }

                fields[HEIGHT_FIELD].set(
                    x,
                    y,
                    [heights[0] + i * heights[1], heights[2] + i * heights[3]],
                );
                fields[SLOPE_FIELD_01].set(x, y, [slopes[0], slopes[1]]);
                fields[SLOPE_FIELD_23].set(x, y, [slopes[2], slopes[3]]);
                fields[DISPLACEMENT_FIELD_01].set(x, y, [displacements[0], displacements[1]]);
                fields[DISPLACEMENT_FIELD_23].set(x, y, [displacements[2], displacements[3]]);
            }
        }
        Ok(())
    }

    fn check_size(&self, actual: usize) -> Result<(), TransformError> {
        if actual == self.size {
            Ok(())
        } else {
            Err(TransformError::SizeMismatch {
                expected: self.size,
                actual,
            })
        }
    }
}

/// Fresh set of zeroed transform inputs.
pub fn empty_fields(size: usize) -> [SpectrumField; FIELD_COUNT] {
    std::array::from_fn(|_| SpectrumField::zeroed(size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fourier::{CpuFourier, TransformEngine};
    use crate::spectrum::{DispersionTable, SpectrumGenerator};

    fn setup() -> (SpectrumEvolver, SpectralGrid, DispersionGrid) {
        let config = SpectrumConfig {
            size: 16,
            ..Default::default()
        };
        let generator = SpectrumGenerator::new(&config).unwrap();
        let (spectrum, _) = generator.generate();
        let dispersion = DispersionTable::build(generator.config());
        (SpectrumEvolver::new(generator.config()), spectrum, dispersion)
    }

    #[test]
    fn test_evolve_preserves_magnitude() {
        let (evolver, spectrum, dispersion) = setup();
        let n = spectrum.size();

        for &t in &[0.0, 0.016, 1.0, 37.5, 1000.0] {
            let evolved = evolver.evolve(&spectrum, &dispersion, t).unwrap();
            for y in 0..n {
                for x in 0..n {
                    for layer in 0..LAYER_COUNT {
                        let before = spectrum.amplitude(x, y, layer).norm();
                        let after = evolved.amplitude(x, y, layer).norm();
                        assert!(
                            (after - before).abs() <= 1e-6 * before.max(1e-30),
                            "t={} cell=({}, {}) layer={}",
                            t,
                            x,
                            y,
                            layer
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_evolve_at_zero_is_identity() {
        let (evolver, spectrum, dispersion) = setup();
        let evolved = evolver.evolve(&spectrum, &dispersion, 0.0).unwrap();
        for y in 0..spectrum.size() {
            for x in 0..spectrum.size() {
                for layer in 0..LAYER_COUNT {
                    assert_eq!(
                        evolved.amplitude(x, y, layer),
                        spectrum.amplitude(x, y, layer)
                    );
                }
            }
        }
    }

    #[test]
    fn test_evolve_rotates_by_omega_t() {
        let (evolver, spectrum, dispersion) = setup();
        let t = 2.5;
        let evolved = evolver.evolve(&spectrum, &dispersion, t).unwrap();

        // Layer 3 cell (1, 0) has energy for the default sea state.
        let a = spectrum.amplitude(1, 0, 3);
        let b = evolved.amplitude(1, 0, 3);
        assert!(a.norm() > 0.0);
        let expected = Complex32::from_polar(1.0, dispersion.omega(1, 0, 3) * t);
        assert!((b / a - expected).norm() < 1e-4);
    }

    #[test]
    fn test_single_layer_height_transforms_to_real_field() {
        let (evolver, spectrum, dispersion) = setup();
        let n = spectrum.size();
        let mut evolved = evolver.evolve(&spectrum, &dispersion, 3.0).unwrap();
        for layer in 1..LAYER_COUNT {
            evolved.layers[layer].fill(Complex32::new(0.0, 0.0));
        }

        let mut fields = empty_fields(n);
        evolver.compose(&evolved, &mut fields).unwrap();

        let mut engine = CpuFourier::new(n).unwrap();
        engine
            .inverse_transform(std::slice::from_mut(&mut fields[HEIGHT_FIELD]))
            .unwrap();

        let cells = fields[HEIGHT_FIELD].cells();
        let peak = cells.iter().map(|c| c[0].re.abs()).fold(0.0_f32, f32::max);
        assert!(peak > 0.0);
        for cell in cells {
            // Layer 1 shares the imaginary part and is empty here.
            assert!(cell[0].im.abs() <= 1e-4 * peak);
            assert!(cell[1].norm() <= 1e-4 * peak);
        }
    }

    #[test]
    fn test_displacement_zero_at_dc() {
        let (evolver, spectrum, dispersion) = setup();
        let evolved = evolver.evolve(&spectrum, &dispersion, 1.0).unwrap();
        let mut fields = empty_fields(spectrum.size());
        evolver.compose(&evolved, &mut fields).unwrap();

        for field in [DISPLACEMENT_FIELD_01, DISPLACEMENT_FIELD_23] {
            for c in fields[field].get(0, 0) {
                assert_eq!(c, Complex32::new(0.0, 0.0));
            }
        }
    }

    #[test]
    fn test_mismatched_sizes_are_reported() {
        let (evolver, spectrum, dispersion) = setup();
        let coarse = SpectrumConfig {
            size: 8,
            ..Default::default()
        };
        let small_spectrum = SpectrumGenerator::new(&coarse).unwrap().generate().0;
        let small_dispersion = DispersionTable::build(&coarse);

        assert_eq!(
            evolver.evolve(&small_spectrum, &dispersion, 1.0),
            Err(TransformError::SizeMismatch {
                expected: 16,
                actual: 8
            })
        );
        assert!(evolver.evolve(&spectrum, &small_dispersion, 1.0).is_err());

        let evolved = evolver.evolve(&spectrum, &dispersion, 1.0).unwrap();
        let mut fields = empty_fields(8);
        assert_eq!(
            evolver.compose(&evolved, &mut fields),
            Err(TransformError::SizeMismatch {
                expected: 16,
                actual: 8
            })
        );
    }

    #[test]
    fn test_uncorrected_size_matches_generator() {
        let config = SpectrumConfig {
            size: 100,
            ..Default::default()
        };
        let generator = SpectrumGenerator::new(&config).unwrap();
        let (spectrum, _) = generator.generate();
        let dispersion = DispersionTable::build(&config);
        let evolver = SpectrumEvolver::new(&config);

        assert_eq!(spectrum.size(), 128);
        assert_eq!(dispersion.size(), 128);
        assert_eq!(evolver.size(), 128);

        let evolved = evolver.evolve(&spectrum, &dispersion, 0.5).unwrap();
        let mut fields = empty_fields(evolver.size());
        evolver.compose(&evolved, &mut fields).unwrap();
    }
}
