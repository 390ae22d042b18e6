pub mod config;
pub mod geodesy;
pub mod io;
pub mod map;
pub mod overlay;
pub mod scene;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use config::SceneConfig;
use geodesy::{GeoCircle, GeoPoint, DEGREES_BETWEEN_POINTS};
use log::{error, info};
use scene::Scene;

use crate::io::{ring_output::format_ring, svg_output::make_svg};


#[derive(Parser)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print a circle approximated as a closed ring, one `latitude,longitude` per line.
    Circle {
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,
        #[arg(long, allow_hyphen_values = true)]
        longitude: f64,
        /// Radius in meters.
        #[arg(long, allow_hyphen_values = true)]
        radius: f64,
        /// Bearing between ring points, in degrees.
        #[arg(long, default_value_t = DEGREES_BETWEEN_POINTS)]
        resolution: f64,
    },
    /// Replay the button presses of a scene and render the map after each one.
    Scene {
        /// Path to the scene config.
        config: PathBuf,
    },
}


fn main() {
    if let Err(_) = std::env::var("RUST_LOG") {
        unsafe { std::env::set_var("RUST_LOG", "info") };
    }

    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        error!("{err:#}");
        std::process::exit(1);
    }
}


fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Circle { latitude, longitude, radius, resolution } => {
            config::check_resolution(resolution)?;

            let ring = GeoCircle::new(GeoPoint::new(latitude, longitude), radius).polygonize_with_resolution(resolution);
            print!("{}", format_ring(&ring));
            Ok(())
        },
        Command::Scene { config } => run_scene(config),
    }
}


fn run_scene(path: PathBuf) -> Result<()> {
    let file = std::fs::File::open(&path).with_context(|| format!("Could not open {path:?}"))?;
    let config: SceneConfig = serde_norway::from_reader(file)?;
    config.validate()?;

    if !config.outdir.exists() {
        std::fs::create_dir_all(&config.outdir)?;
    }
    ensure!(config.outdir.is_dir(), "{:?} should be a directory", config.outdir);

    let name = &config.name;
    let mut scene = Scene::from_config(&config);

    scene.replay(&config, |i, scene| {
        let document = make_svg(scene.map(), &config.style, config.marker_radius);
        let output_path = config.outdir.join(format!("{name}-{i:02}.svg"));
        svg::save(output_path, &document)?;

        info!("Press {i:02} - rendered {} overlays", scene.map().len());
        Ok(())
    })?;

    let document = make_svg(scene.map(), &config.style, config.marker_radius);
    let output_path = config.outdir.join(format!("{name}.svg"));
    svg::save(output_path, &document)?;

    info!("Produced the final map");

    Ok(())
}
