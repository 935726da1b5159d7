//! Spectral wave simulation: static spectrum, per-frame evolution, transform.

use log::{info, warn};

use super::maps::OceanMaps;
use crate::error::{OceanError, Result};
use crate::fourier::{CpuFourier, PingPong, SpectrumField, TransformEngine};
use crate::params::SpectrumConfig;
use crate::spectrum::{
    empty_fields, DispersionGrid, DispersionTable, SpectralGrid, SpectrumEvolver,
    SpectrumGenerator, VarianceCorrection, FIELD_COUNT, SLOPE_FIELD_23,
};

/// Ocean wave simulation for one configuration
///
/// The spectrum and dispersion table are built once per configuration. Each
/// [`step`](Self::step) evolves them to the requested time, hands the five
/// Hermitian fields to the transform engine and reads the spatial maps back.
pub struct OceanSimulation {
    config: SpectrumConfig,
    spectrum: SpectralGrid,
    variance: VarianceCorrection,
    dispersion: DispersionGrid,
    evolver: SpectrumEvolver,
    buffers: PingPong<[SpectrumField; FIELD_COUNT]>,
    engine: Option<Box<dyn TransformEngine>>,
    maps: OceanMaps,
    /// Completed steps
    generation: u64,
}

impl OceanSimulation {
    /// Generate the spectrum for `config`. No transform engine is attached.
    pub fn new(config: &SpectrumConfig) -> Result<Self> {
        let generator = SpectrumGenerator::new(config)?;
        let config = generator.config().clone();
        let (spectrum, variance) = generator.generate();
        let dispersion = DispersionTable::build(&config);
        let evolver = SpectrumEvolver::new(&config);
        let size = config.size;

        info!(
            "Ocean simulation ready: {}x{} grid, variance correction {:.6}",
            size,
            size,
            variance.delta()
        );

        Ok(Self {
            buffers: PingPong::new(empty_fields(size), empty_fields(size)),
            maps: OceanMaps::new(size, config.choppiness),
            config,
            spectrum,
            variance,
            dispersion,
            evolver,
            engine: None,
            generation: 0,
        })
    }

    /// Simulation using the CPU reference transform.
    pub fn with_cpu_engine(config: &SpectrumConfig) -> Result<Self> {
        let simulation = Self::new(config)?;
        let engine = CpuFourier::new(simulation.size())?;
        Ok(simulation.with_engine(Box::new(engine)))
    }

    pub fn with_engine(mut self, engine: Box<dyn TransformEngine>) -> Self {
        self.set_engine(Some(engine));
        self
    }

    pub fn set_engine(&mut self, engine: Option<Box<dyn TransformEngine>>) {
        if let Some(engine) = &engine {
            if engine.size() != self.size() {
                warn!(
                    "Transform engine is sized {}, simulation runs at {}",
                    engine.size(),
                    self.size()
                );
            }
        }
        self.engine = engine;
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    /// Regenerate everything for a new configuration.
    ///
    /// The attached engine is kept; if its size no longer matches, the next
    /// step reports the mismatch.
    pub fn reconfigure(&mut self, config: &SpectrumConfig) -> Result<()> {
        let mut next = Self::new(config)?;
        next.generation = self.generation;
        next.set_engine(self.engine.take());
        *self = next;
        Ok(())
    }

    /// Evolve to `time_s` and refresh the spatial maps.
    ///
    /// On failure the maps and the read buffer keep the previous frame.
    pub fn step(&mut self, time_s: f32) -> Result<&OceanMaps> {
        let Some(engine) = self.engine.as_mut() else {
            return Err(OceanError::MissingTransformEngine);
        };

        let evolved = self.evolver.evolve(&self.spectrum, &self.dispersion, time_s)?;
        let fields = self.buffers.write_slot_mut();
        self.evolver.compose(&evolved, fields)?;

        // heights + slopes, then the two displacement fields
        let (first, second) = fields.split_at_mut(SLOPE_FIELD_23 + 1);
        engine.inverse_transform(first)?;
        engine.inverse_transform(second)?;

        self.buffers.flip();
        self.maps.update_from(self.buffers.read_slot(), time_s);
        self.generation += 1;
        Ok(&self.maps)
    }

    pub fn maps(&self) -> &OceanMaps {
        &self.maps
    }

    /// Number of completed steps.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn size(&self) -> usize {
        self.config.size
    }

    /// Configuration in use (resolution already corrected).
    pub fn config(&self) -> &SpectrumConfig {
        &self.config
    }

    pub fn spectrum(&self) -> &SpectralGrid {
        &self.spectrum
    }

    pub fn dispersion(&self) -> &DispersionGrid {
        &self.dispersion
    }

    pub fn variance_correction(&self) -> &VarianceCorrection {
        &self.variance
    }
}
