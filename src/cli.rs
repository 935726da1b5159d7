//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::params::OceanConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "swellgrid")]
#[command(about = "Spectral ocean waves on a projected grid", long_about = None)]
pub struct Args {
    /// JSON configuration file (missing fields use defaults)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fourier grid resolution (overrides the config file)
    #[arg(long, global = true, value_name = "N")]
    pub size: Option<usize>,

    /// Random phase seed (overrides the config file)
    #[arg(long, global = true, value_name = "SEED")]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Generate the spectrum and print its variance correction and checksum
    Spectrum,

    /// Run one simulation step and write the height field as a grayscale PNG
    Heightmap {
        /// Simulation time (seconds)
        #[arg(long, default_value = "0")]
        time: f32,

        #[arg(long, short, value_name = "FILE", default_value = "heightmap.png")]
        output: PathBuf,
    },

    /// Solve the projector for one camera pose and print the matrices
    Project {
        /// Camera position (meters)
        #[arg(
            long,
            required = true,
            num_args = 3,
            value_names = ["X", "Y", "Z"],
            allow_negative_numbers = true
        )]
        position: Vec<f32>,

        /// Look-at target (meters)
        #[arg(
            long,
            required = true,
            num_args = 3,
            value_names = ["X", "Y", "Z"],
            allow_negative_numbers = true
        )]
        target: Vec<f32>,
    },

    /// Drive the full frame loop with the configured camera preset
    Run {
        #[arg(long, default_value = "60")]
        frames: u32,

        /// Time step per frame (seconds)
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
    },
}

impl Args {
    /// Configuration from `--config` (or defaults) with command-line overrides.
    pub fn load_config(&self) -> Result<OceanConfig> {
        let mut config = match &self.config {
            Some(path) => OceanConfig::from_json_file(path)?,
            None => OceanConfig::default(),
        };

        if let Some(size) = self.size {
            config.spectrum.size = size;
        }
        if let Some(seed) = self.seed {
            config.spectrum.seed = seed;
        }
        Ok(config)
    }
}
