//! Random-phase sampling of the wave spectrum into four layered grids.

use std::f64::consts::PI;

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustfft::num_complex::Complex32;

use super::model::SpectrumModel;
use crate::error::Result;
use crate::params::{SpectrumConfig, LAYER_COUNT};

/// Static complex amplitudes for the four layers.
///
/// Stored like two RGBA float textures: `spectrum01` holds layers 0 and 1 as
/// `(re0, im0, re1, im1)`, `spectrum23` holds layers 2 and 3. Cell `(x, y)`
/// lives at index `x + y * size`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralGrid {
    size: usize,
    spectrum01: Vec<[f32; 4]>,
    spectrum23: Vec<[f32; 4]>,
}

impl SpectralGrid {
    fn zeroed(size: usize) -> Self {
        Self {
            size,
            spectrum01: vec![[0.0; 4]; size * size],
            spectrum23: vec![[0.0; 4]; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Amplitude of one layer at cell `(x, y)`.
    pub fn amplitude(&self, x: usize, y: usize, layer: usize) -> Complex32 {
        let idx = x + y * self.size;
        let texel = if layer < 2 {
            &self.spectrum01[idx]
        } else {
            &self.spectrum23[idx]
        };
        let c = (layer % 2) * 2;
        Complex32::new(texel[c], texel[c + 1])
    }

    fn set(&mut self, idx: usize, layer: usize, re: f32, im: f32) {
        let texel = if layer < 2 {
            &mut self.spectrum01[idx]
        } else {
            &mut self.spectrum23[idx]
        };
        let c = (layer % 2) * 2;
        texel[c] = re;
        texel[c + 1] = im;
    }

    pub fn spectrum01(&self) -> &[[f32; 4]] {
        &self.spectrum01
    }

    pub fn spectrum23(&self) -> &[[f32; 4]] {
        &self.spectrum23
    }

    /// Raw texel bytes of both grids for a texture upload.
    pub fn as_bytes(&self) -> (&[u8], &[u8]) {
        (
            bytemuck::cast_slice(&self.spectrum01),
            bytemuck::cast_slice(&self.spectrum23),
        )
    }

    /// Position-weighted sum of every stored component.
    ///
    /// Sensitive to both values and their placement, so it works as a
    /// fingerprint for golden comparisons.
    pub fn checksum(&self) -> f64 {
        self.spectrum01
            .iter()
            .chain(self.spectrum23.iter())
            .flatten()
            .enumerate()
            .map(|(i, &v)| v as f64 * ((i % 97) as f64 + 1.0))
            .sum()
    }
}

/// Gap between the continuous slope variance and what the discrete grids hold.
///
/// Feeds the BRDF variance precomputation downstream so unresolved small
/// waves still roughen the shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceCorrection {
    /// Slope variance integrated over the continuous spectrum
    pub theoretical: f64,
    /// Slope variance carried by the sampled amplitudes
    pub sampled: f64,
}

impl VarianceCorrection {
    /// The scalar handed to the variance pass: `0.5·(theoretical − sampled)`.
    pub fn delta(&self) -> f64 {
        0.5 * (self.theoretical - self.sampled)
    }
}

/// Samples [`SpectrumModel`] onto the Fourier grid of each layer
#[derive(Debug, Clone)]
pub struct SpectrumGenerator {
    config: SpectrumConfig,
    model: SpectrumModel,
}

impl SpectrumGenerator {
    /// Validate the config and correct its resolution.
    pub fn new(config: &SpectrumConfig) -> Result<Self> {
        config.validate()?;
        let config = config.corrected();
        Ok(Self {
            model: SpectrumModel::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &SpectrumConfig {
        &self.config
    }

    /// Build the layered spectrum and its slope variance correction.
    ///
    /// The phase RNG is reseeded from the config on every call, so the same
    /// config always yields bit-identical output.
    pub fn generate(&self) -> (SpectralGrid, VarianceCorrection) {
        let size = self.config.size;
        let grid_sizes = self.config.grid_sizes_m.map(|g| g as f64);
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);

        // Each layer only keeps wavelengths the next coarser one cannot hold.
        let k_min = [
            PI / grid_sizes[0],
            PI * size as f64 / grid_sizes[0],
            PI * size as f64 / grid_sizes[1],
            PI * size as f64 / grid_sizes[2],
        ];

        let mut grid = SpectralGrid::zeroed(size);
        let mut sampled = 0.0;

        for x in 0..size {
            for y in 0..size {
                let idx = x + y * size;
                let i = signed_index(x, size);
                let j = signed_index(y, size);

                for layer in 0..LAYER_COUNT {
                    let (re, im) = self.sample(i, j, grid_sizes[layer], k_min[layer], &mut rng);
                    grid.set(idx, layer, re as f32, im as f32);

                    let kx = i * 2.0 * PI / grid_sizes[layer];
                    let ky = j * 2.0 * PI / grid_sizes[layer];
                    sampled += (kx * kx + ky * ky) * (re * re + im * im) * 2.0;
                }
            }
        }

        let variance = VarianceCorrection {
            theoretical: self.theoretical_slope_variance(),
            sampled,
        };

        debug!(
            "Generated {}x{} spectrum: slope variance {:.6} theoretical, {:.6} sampled, delta {:.6}",
            size,
            size,
            variance.theoretical,
            variance.sampled,
            variance.delta()
        );

        (grid, variance)
    }

    /// One random-phase sample. Always consumes exactly one draw.
    fn sample(
        &self,
        i: f64,
        j: f64,
        length_scale: f64,
        k_min: f64,
        rng: &mut ChaCha8Rng,
    ) -> (f64, f64) {
        let dk = 2.0 * PI / length_scale;
        let kx = i * dk;
        let ky = j * dk;
        let rnd: f64 = rng.gen();

        if kx.abs() >= k_min || ky.abs() >= k_min {
            let s = self.model.density(kx, ky, false);
            let h = (s / 2.0).sqrt() * dk;
            let phi = rnd * 2.0 * PI;
            (h * phi.cos(), h * phi.sin())
        } else {
            (0.0, 0.0)
        }
    }

    /// Slope variance of the continuous spectrum, integrated geometrically
    /// over k in [5e-3, 1e3).
    fn theoretical_slope_variance(&self) -> f64 {
        let mut total = 0.0;
        let mut k = 5e-3;
        while k < 1e3 {
            let next = k * 1.001;
            total += k * k * self.model.density(k, 0.0, true) * (next - k);
            k = next;
        }
        total
    }
}

/// Frequency index of cell `x`: values from `size / 2` upward wrap negative.
#[inline]
pub(crate) fn signed_index(x: usize, size: usize) -> f64 {
    if x >= size / 2 {
        x as f64 - size as f64
    } else {
        x as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SpectrumConfig {
        SpectrumConfig {
            size: 32,
            ..Default::default()
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let generator = SpectrumGenerator::new(&small_config()).unwrap();
        let (a, va) = generator.generate();
        let (b, vb) = generator.generate();
        assert_eq!(a, b);
        assert_eq!(va.delta().to_bits(), vb.delta().to_bits());
    }

    #[test]
    fn test_seed_changes_phases_not_magnitudes() {
        let a = SpectrumGenerator::new(&small_config()).unwrap().generate().0;
        let b = SpectrumGenerator::new(&SpectrumConfig {
            seed: 7,
            ..small_config()
        })
        .unwrap()
        .generate()
        .0;
        assert_ne!(a, b);

        for y in 0..a.size() {
            for x in 0..a.size() {
                for layer in 0..LAYER_COUNT {
                    let ma = a.amplitude(x, y, layer).norm();
                    let mb = b.amplitude(x, y, layer).norm();
                    assert!((ma - mb).abs() <= 1e-5 * ma.max(1e-12));
                }
            }
        }
    }

    #[test]
    fn test_upwind_cells_are_zero() {
        let (grid, _) = SpectrumGenerator::new(&small_config()).unwrap().generate();
        let n = grid.size();
        for y in 0..n {
            for x in n / 2..n {
                for layer in 0..LAYER_COUNT {
                    assert_eq!(grid.amplitude(x, y, layer), Complex32::new(0.0, 0.0));
                }
            }
        }
    }

    #[test]
    fn test_dc_cell_is_zero() {
        let (grid, _) = SpectrumGenerator::new(&small_config()).unwrap().generate();
        for layer in 0..LAYER_COUNT {
            assert_eq!(grid.amplitude(0, 0, layer), Complex32::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_fine_layer_skips_coarse_wavelengths() {
        // With N = 32 the second layer's kMin is π·32/5488; its first index
        // (dk = 2π/392) sits below that and must stay empty along both axes.
        let (grid, _) = SpectrumGenerator::new(&small_config()).unwrap().generate();
        assert_eq!(grid.amplitude(1, 0, 1), Complex32::new(0.0, 0.0));
        assert_eq!(grid.amplitude(1, 1, 1), Complex32::new(0.0, 0.0));
        assert!(grid.amplitude(8, 0, 1).norm() > 0.0);
    }

    #[test]
    fn test_variance_terms_positive() {
        let (_, variance) = SpectrumGenerator::new(&small_config()).unwrap().generate();
        assert!(variance.theoretical > 0.0);
        assert!(variance.sampled > 0.0);
        assert!(variance.theoretical > variance.sampled);
        assert!(variance.delta().is_finite());
    }

    #[test]
    fn test_resolution_corrected_on_construction() {
        let generator = SpectrumGenerator::new(&SpectrumConfig {
            size: 48,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(generator.config().size, 64);
        assert_eq!(generator.generate().0.size(), 64);
    }

    #[test]
    fn test_signed_index_wraps() {
        assert_eq!(signed_index(0, 8), 0.0);
        assert_eq!(signed_index(3, 8), 3.0);
        assert_eq!(signed_index(4, 8), -4.0);
        assert_eq!(signed_index(7, 8), -1.0);
    }

    #[test]
    fn test_bytes_cover_both_grids() {
        let (grid, _) = SpectrumGenerator::new(&small_config()).unwrap().generate();
        let (a, b) = grid.as_bytes();
        assert_eq!(a.len(), 32 * 32 * 16);
        assert_eq!(b.len(), 32 * 32 * 16);
    }
}
