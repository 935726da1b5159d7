//! Spatial maps read back after the inverse transform.

use glam::Vec2;
use image::{GrayImage, Luma};

use crate::fourier::SpectrumField;
use crate::params::LAYER_COUNT;
use crate::spectrum::{
    DISPLACEMENT_FIELD_01, DISPLACEMENT_FIELD_23, FIELD_COUNT, HEIGHT_FIELD, SLOPE_FIELD_01,
    SLOPE_FIELD_23,
};

/// Five N×N RGBA float maps, texture-like, at index `x + y * size`.
///
/// - height: layers 0..3 in r, g, b, a
/// - slope 0/1 and 2/3: (sx, sy) of two layers each
/// - displacement 0/1 and 2/3: (dx, dz) of two layers each
#[derive(Debug, Clone, PartialEq)]
pub struct OceanMaps {
    size: usize,
    time_s: f32,
    choppiness: [f32; LAYER_COUNT],
    maps: [Vec<[f32; 4]>; FIELD_COUNT],
}

impl OceanMaps {
    pub fn new(size: usize, choppiness: [f32; LAYER_COUNT]) -> Self {
        Self {
            size,
            time_s: 0.0,
            choppiness,
            maps: std::array::from_fn(|_| vec![[0.0; 4]; size * size]),
        }
    }

    /// Copy the transformed fields out.
    pub(crate) fn update_from(&mut self, fields: &[SpectrumField; FIELD_COUNT], time_s: f32) {
        for (map, field) in self.maps.iter_mut().zip(fields) {
            for (idx, texel) in map.iter_mut().enumerate() {
                *texel = field.texel(idx);
            }
        }
        self.time_s = time_s;
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Simulation time the maps were computed for.
    pub fn time_s(&self) -> f32 {
        self.time_s
    }

    pub fn map(&self, field: usize) -> &[[f32; 4]] {
        &self.maps[field]
    }

    pub fn map_bytes(&self, field: usize) -> &[u8] {
        bytemuck::cast_slice(&self.maps[field])
    }

    /// Surface height above the plane at a cell, all layers summed (meters).
    pub fn height(&self, x: usize, y: usize) -> f32 {
        self.maps[HEIGHT_FIELD][self.index(x, y)].iter().sum()
    }

    pub fn layer_height(&self, x: usize, y: usize, layer: usize) -> f32 {
        self.maps[HEIGHT_FIELD][self.index(x, y)][layer]
    }

    /// Surface gradient at a cell, all layers summed.
    pub fn slope(&self, x: usize, y: usize) -> Vec2 {
        let idx = self.index(x, y);
        let a = self.maps[SLOPE_FIELD_01][idx];
        let b = self.maps[SLOPE_FIELD_23][idx];
        Vec2::new(a[0] + a[2] + b[0] + b[2], a[1] + a[3] + b[1] + b[3])
    }

    /// Horizontal offset of a cell, weighted by per-layer choppiness.
    ///
    /// Points are pulled towards wave crests, hence the negative sign.
    pub fn displacement(&self, x: usize, y: usize) -> Vec2 {
        let idx = self.index(x, y);
        let a = self.maps[DISPLACEMENT_FIELD_01][idx];
        let b = self.maps[DISPLACEMENT_FIELD_23][idx];
        let c = self.choppiness;

        -Vec2::new(
            c[0] * a[0] + c[1] * a[2] + c[2] * b[0] + c[3] * b[2],
            c[0] * a[1] + c[1] * a[3] + c[2] * b[1] + c[3] * b[3],
        )
    }

    /// Lowest and highest summed height over the grid.
    pub fn height_range(&self) -> (f32, f32) {
        self.maps[HEIGHT_FIELD]
            .iter()
            .map(|t| t.iter().sum::<f32>())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), h| {
                (lo.min(h), hi.max(h))
            })
    }

    /// Summed height normalised to 8-bit grayscale (flat seas render mid-gray).
    pub fn height_image(&self) -> GrayImage {
        let (lo, hi) = self.height_range();
        let span = hi - lo;
        let size = self.size as u32;

        GrayImage::from_fn(size, size, |x, y| {
            let h = self.height(x as usize, y as usize);
            let v = if span > 0.0 { (h - lo) / span } else { 0.5 };
            Luma([(v * 255.0).round() as u8])
        })
    }

    fn index(&self, x: usize, y: usize) -> usize {
        (x % self.size) + (y % self.size) * self.size
    }
}
