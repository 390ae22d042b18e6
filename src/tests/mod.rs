
use std::path::Path;

use anyhow::{ensure, Result};

use crate::{config::SceneConfig, io::svg_output::make_svg, scene::Scene};

pub const OUTDIR: &'_ str = "tmp/test-output/";

fn ensure_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    ensure!(dir.is_dir(), "{dir:?} should be a directory");
    Ok(())
}

pub fn init_test_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .format_timestamp(None)
        .format_target(false)
        .is_test(true)
        .try_init();
}

/// Replay `yaml` and save the final map as `output-{name}.svg`.
pub fn run(name: &str, yaml: &str) -> Result<Scene> {
    init_test_logger();
    ensure_dir(OUTDIR)?;

    let config: SceneConfig = serde_norway::from_str(yaml)?;
    config.validate()?;

    let mut scene = Scene::from_config(&config);
    scene.replay(&config, |_, _| Ok(()))?;

    let output = format!("output-{name}");
    let output = Path::new(OUTDIR).join(output).with_extension("svg");

    let doc = make_svg(scene.map(), &config.style, config.marker_radius);
    svg::save(output, &doc)?;

    Ok(scene)
}
