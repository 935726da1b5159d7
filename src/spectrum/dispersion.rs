//! Per-cell angular frequency lookup for each layer.

use super::model::dispersion;
use crate::params::{SpectrumConfig, LAYER_COUNT};

/// Angular frequency ω(k) of every cell, one channel per layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DispersionGrid {
    size: usize,
    table: Vec<[f32; 4]>,
}

impl DispersionGrid {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn omega(&self, x: usize, y: usize, layer: usize) -> f32 {
        self.table[x + y * self.size][layer]
    }
}

/// Builds the [`DispersionGrid`] for a configuration.
///
/// Depends only on the resolution and layer sizes, so it only needs rebuilding
/// when those change.
pub struct DispersionTable;

impl DispersionTable {
    /// Built at the corrected resolution, so it always matches the grid
    /// [`SpectrumGenerator`](super::SpectrumGenerator) produces for `config`.
    pub fn build(config: &SpectrumConfig) -> DispersionGrid {
        let size = config.corrected_resolution();
        let inverse_grid_sizes = config.inverse_grid_sizes(size);
        let mut table = vec![[0.0; 4]; size * size];

        for y in 0..size {
            for x in 0..size {
                let (sx, sy) = normalized_coord(x, y, size);
                let texel = &mut table[x + y * size];
                for layer in 0..LAYER_COUNT {
                    let k = wave_number(sx, sy, inverse_grid_sizes[layer]);
                    texel[layer] = dispersion(k) as f32;
                }
            }
        }

        DispersionGrid { size, table }
    }
}

/// Signed cell coordinate in [-0.5, 0.5).
#[inline]
pub(crate) fn normalized_coord(x: usize, y: usize, size: usize) -> (f64, f64) {
    let wrap = |v: usize| {
        let u = v as f64 / size as f64;
        if u >= 0.5 {
            u - 1.0
        } else {
            u
        }
    };
    (wrap(x), wrap(y))
}

#[inline]
pub(crate) fn wave_number(sx: f64, sy: f64, inverse_grid_size: f64) -> f64 {
    let kx = sx * inverse_grid_size;
    let ky = sy * inverse_grid_size;
    (kx * kx + ky * ky).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> (SpectrumConfig, DispersionGrid) {
        let config = SpectrumConfig {
            size: 16,
            ..Default::default()
        };
        let grid = DispersionTable::build(&config);
        (config, grid)
    }

    #[test]
    fn test_dc_cell_is_zero() {
        let (_, grid) = table();
        for layer in 0..LAYER_COUNT {
            assert_eq!(grid.omega(0, 0, layer), 0.0);
        }
    }

    #[test]
    fn test_values_non_negative_and_monotonic_in_k() {
        let (config, grid) = table();
        let n = grid.size();
        let inv = config.inverse_grid_sizes(n);

        for layer in 0..LAYER_COUNT {
            let mut cells: Vec<(f64, f32)> = Vec::new();
            for y in 0..n {
                for x in 0..n {
                    let (sx, sy) = normalized_coord(x, y, n);
                    let omega = grid.omega(x, y, layer);
                    assert!(omega >= 0.0 && omega.is_finite());
                    cells.push((wave_number(sx, sy, inv[layer]), omega));
                }
            }
            cells.sort_by(|a, b| a.0.total_cmp(&b.0));
            for pair in cells.windows(2) {
                assert!(pair[1].1 >= pair[0].1, "layer {} not monotonic", layer);
            }
        }
    }

    #[test]
    fn test_mirrored_cells_match() {
        let (_, grid) = table();
        let n = grid.size();
        for y in 0..n {
            for x in 0..n {
                let mx = (n - x) % n;
                let my = (n - y) % n;
                for layer in 0..LAYER_COUNT {
                    assert_eq!(grid.omega(x, y, layer), grid.omega(mx, my, layer));
                }
            }
        }
    }

    #[test]
    fn test_nyquist_coordinate_wraps_negative() {
        assert_eq!(normalized_coord(8, 0, 16), (-0.5, 0.0));
        assert_eq!(normalized_coord(7, 15, 16), (7.0 / 16.0, -1.0 / 16.0));
    }
}
