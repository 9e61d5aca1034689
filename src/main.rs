use anyhow::{Context, Result};
use ferret::{
    config::create_clap_command,
    core::{geometry::builtin, Animator, Host},
    renderers::{TerminalRenderer, WindowRenderer},
    Config, RenderTarget, Scene,
};
use log::{error, info};
use rand::seq::SliceRandom;
use simplelog::{Config as LogConfig, WriteLogger};
use std::fs::OpenOptions;

const TITLE_LABELS: &[&str] = &[
    "now with 100% more faces",
    "painter's algorithm edition",
    "spinning since startup",
    "no z-buffer, no problem",
];

fn init_logging(config: &Config) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("opening log file {}", config.log_file.display()))?;
    WriteLogger::init(config.log_level, LogConfig::default(), log_file)
        .context("installing logger")?;
    Ok(())
}

fn load_scene(config: &Config) -> Result<Scene> {
    let Some(obj_path) = &config.obj_path else {
        info!("No model given, using the built-in cube");
        return Ok(builtin::cube(config.default_color)?);
    };

    let mtl_path = config.resolved_mtl_path();
    info!(
        "Loading {} (materials: {})",
        obj_path.display(),
        mtl_path
            .as_deref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string())
    );
    Scene::from_files(obj_path, mtl_path.as_deref(), config.default_color)
        .with_context(|| format!("loading {}", obj_path.display()))
}

fn run<H: Host>(config: &Config, scene: Scene, host: &mut H, size: usize) -> Result<()> {
    let mut animator = Animator::new(scene, config.view(size), config.step, config.wrap_angles);
    animator.run(host, config.tick_interval)?;
    Ok(())
}

fn main() -> Result<()> {
    let matches = create_clap_command().get_matches();
    let config = Config::from_matches(&matches);
    init_logging(&config)?;

    let scene = match load_scene(&config) {
        Ok(scene) => scene,
        Err(e) => {
            error!("{e:#}");
            return Err(e);
        }
    };

    match config.target {
        RenderTarget::Window => {
            let label = TITLE_LABELS
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or_default();
            let mut host = WindowRenderer::new(&format!("ferret - {label}"), config.size)
                .context("opening window")?;
            run(&config, scene, &mut host, config.size)
        }
        RenderTarget::Terminal => {
            let mut host = TerminalRenderer::new().context("setting up terminal")?;
            let size = host.size();
            run(&config, scene, &mut host, size)
        }
    }
}
