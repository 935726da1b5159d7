//! Ocean simulation and per-frame host.

mod maps;
mod simulation;
mod system;

// Re-export public types
pub use maps::OceanMaps;
pub use simulation::OceanSimulation;
pub use system::{FrameOutput, OceanSystem};
