//! swellgrid - spectral ocean waves on a camera-projected grid
//!
//! The waves come from a statistical wind-wave spectrum evolved in the
//! frequency domain; a fixed screen-space mesh is mapped onto them by a
//! per-frame projector solve.

use clap::Parser;
use glam::{Mat4, Vec2, Vec3};
use log::info;

use swellgrid::camera::CameraSystem;
use swellgrid::cli::{Args, Command};
use swellgrid::error::Result;
use swellgrid::grid::{reconstruct_world, CullMode, ScreenGrid};
use swellgrid::ocean::{OceanSimulation, OceanSystem};
use swellgrid::params::OceanConfig;
use swellgrid::projection::{Camera, ProjectionSolver};
use swellgrid::spectrum::SpectrumGenerator;

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.load_config()?;

    match &args.command {
        Command::Spectrum => print_spectrum(&config),
        Command::Heightmap { time, output } => {
            let mut simulation = OceanSimulation::with_cpu_engine(&config.spectrum)?;
            let image = simulation.step(*time)?.height_image();
            image.save(output)?;
            info!("Height field at t={}s written to {}", time, output.display());
            println!("Wrote {}", output.display());
            Ok(())
        }
        Command::Project { position, target } => {
            let camera = Camera::looking_at(
                Vec3::from_slice(position),
                Vec3::from_slice(target),
                &config.render,
            );
            print_projection(&config, &camera);
            Ok(())
        }
        Command::Run { frames, dt } => run_frames(config, *frames, *dt),
    }
}

fn print_spectrum(config: &OceanConfig) -> Result<()> {
    let generator = SpectrumGenerator::new(&config.spectrum)?;
    let (grid, variance) = generator.generate();

    println!("Resolution:           {}", grid.size());
    println!("Theoretical variance: {:.9}", variance.theoretical);
    println!("Sampled variance:     {:.9}", variance.sampled);
    println!("Variance correction:  {:.9}", variance.delta());
    println!("Spectrum checksum:    {:.9e}", grid.checksum());
    Ok(())
}

fn print_projection(config: &OceanConfig, camera: &Camera) {
    let mut solver = ProjectionSolver::new(&config.projection);
    let state = solver.update(camera);

    println!("IsFlipped: {}", state.is_flipped);
    println!("Visible:   {}", state.visible);
    println!("Cull:      {:?}", CullMode::for_flip(state.is_flipped));
    println!("Projector: {:?}", state.aimed_position);
    print_matrix("ProjectorVP", &state.projector_vp);
    print_matrix("Interpolation", &state.interpolation);
}

fn print_matrix(name: &str, m: &Mat4) {
    println!("{}:", name);
    for i in 0..4 {
        let r = m.row(i);
        println!("  [{:>12.6} {:>12.6} {:>12.6} {:>12.6}]", r.x, r.y, r.z, r.w);
    }
}

fn run_frames(config: OceanConfig, frames: u32, dt: f32) -> Result<()> {
    let grid = ScreenGrid::from_render_config(&config.render)?;
    let cameras = CameraSystem::new(config.camera.clone());
    let render = config.render.clone();
    let mut system = OceanSystem::new(config)?;

    let (columns, rows) = grid.dimensions();
    info!(
        "Running {} frames, screen grid {}x{} quads ({} vertices)",
        frames,
        columns,
        rows,
        grid.vertices.len()
    );

    let mut visible_frames = 0;
    for frame in 0..frames {
        let time_s = frame as f32 * dt;
        let camera = cameras.camera_at(time_s, &render);
        let output = system.step(time_s, Some(&camera));

        let Some(state) = output.projection else {
            continue;
        };
        if state.visible {
            visible_frames += 1;
        }

        let (lo, hi) = system.simulation.maps().height_range();
        let center = reconstruct_world(&state.interpolation, Vec2::splat(0.5));
        info!(
            "frame {:>4} t={:>7.3}s heights [{:>7.3}, {:>7.3}] flipped={} visible={} center={:?}",
            frame, time_s, lo, hi, state.is_flipped, state.visible, center
        );
    }

    println!(
        "{} frames, ocean visible in {}, generation {}",
        frames,
        visible_frames,
        system.simulation.generation()
    );
    Ok(())
}
