//! Frame host tying the wave simulation to the projected grid.

use log::warn;

use super::simulation::OceanSimulation;
use crate::error::{OceanError, Result};
use crate::params::OceanConfig;
use crate::projection::{Camera, ProjectionSolver, ProjectionState};
use crate::rendering::OceanUniforms;

/// What one frame hands to the rendering boundary
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Simulation generation the maps belong to (unchanged when the wave
    /// step was skipped)
    pub generation: u64,

    /// Whether the maps were refreshed this frame
    pub waves_updated: bool,

    /// Solved projector, absent when the projection was skipped
    pub projection: Option<ProjectionState>,

    /// Uniform block, present whenever a projection is
    pub uniforms: Option<OceanUniforms>,
}

/// High-level ocean system: waves plus projector, stepped once per frame
pub struct OceanSystem {
    pub simulation: OceanSimulation,
    pub solver: ProjectionSolver,
    config: OceanConfig,
}

impl OceanSystem {
    /// Build the simulation (with the CPU transform) and the solver.
    pub fn new(config: OceanConfig) -> Result<Self> {
        let simulation = OceanSimulation::with_cpu_engine(&config.spectrum)?;
        Ok(Self::with_simulation(config, simulation))
    }

    pub fn with_simulation(config: OceanConfig, simulation: OceanSimulation) -> Self {
        let solver = ProjectionSolver::new(&config.projection);
        Self {
            simulation,
            solver,
            config,
        }
    }

    pub fn config(&self) -> &OceanConfig {
        &self.config
    }

    /// Advance waves to `time_s` and solve the projector for `camera`.
    ///
    /// A failing wave step or a missing camera skips that part for this frame
    /// only; both are logged and the next call retries.
    pub fn step(&mut self, time_s: f32, camera: Option<&Camera>) -> FrameOutput {
        let waves_updated = match self.simulation.step(time_s) {
            Ok(_) => true,
            Err(e) => {
                warn!("Wave step skipped at t={:.3}s: {}", time_s, e);
                false
            }
        };

        let projection = match self.solve(camera) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!("Projection skipped at t={:.3}s: {}", time_s, e);
                None
            }
        };

        let uniforms = projection.as_ref().map(|state| {
            OceanUniforms::new(
                state,
                self.simulation.config(),
                self.simulation.variance_correction().delta(),
                time_s,
            )
        });

        FrameOutput {
            generation: self.simulation.generation(),
            waves_updated,
            projection,
            uniforms,
        }
    }

    fn solve(&mut self, camera: Option<&Camera>) -> Result<ProjectionState> {
        let camera = camera.ok_or(OceanError::MissingCamera)?;
        Ok(*self.solver.update(camera))
    }
}
