use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;

use crate::core::{Color, RotationStep};
use crate::pipeline::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    Terminal,
    Window,
}

/// Everything the host hands to the renderer. Defaults match a 600px window
/// viewing the model from distance 10 with a field-of-view scalar of 30.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub target: RenderTarget,
    /// Side of the square canvas in pixels (window mode only).
    pub size: usize,
    pub fov: f64,
    pub viewer_distance: f64,
    pub default_color: Color,
    pub step: RotationStep,
    pub tick_interval: Duration,
    pub wrap_angles: bool,
    pub obj_path: Option<PathBuf>,
    pub mtl_path: Option<PathBuf>,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: RenderTarget::Window,
            size: 600,
            fov: 30.0,
            viewer_distance: 10.0,
            default_color: Color::MISSING,
            step: RotationStep::default(),
            tick_interval: Duration::from_millis(16),
            wrap_angles: true,
            obj_path: None,
            mtl_path: None,
            log_file: PathBuf::from("ferret.log"),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// View for a canvas of `size` x `size` pixels.
    pub fn view(&self, size: usize) -> View {
        View {
            fov: self.fov,
            viewer_distance: self.viewer_distance,
            width: size,
            height: size,
        }
    }

    /// The MTL file to read: the one given explicitly, otherwise a `.mtl`
    /// next to the OBJ with the same stem, if there is one.
    pub fn resolved_mtl_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.mtl_path {
            return Some(path.clone());
        }
        let sibling = self.obj_path.as_deref()?.with_extension("mtl");
        sibling.is_file().then_some(sibling)
    }

    pub fn from_matches(matches: &ArgMatches) -> Self {
        let mut config = Self::default();
        let Some(("render", sub)) = matches.subcommand() else {
            return config;
        };

        if let Some(mode) = sub.get_one::<String>("mode") {
            config.target = match mode.as_str() {
                "terminal" | "t" => RenderTarget::Terminal,
                _ => RenderTarget::Window,
            };
        }
        if let Some(&size) = sub.get_one::<u32>("size") {
            config.size = size as usize;
        }
        if let Some(&fov) = sub.get_one::<f64>("fov") {
            config.fov = fov;
        }
        if let Some(&distance) = sub.get_one::<f64>("distance") {
            config.viewer_distance = distance;
        }
        if let Some(&color) = sub.get_one::<Color>("color") {
            config.default_color = color;
        }
        if let Some(&ms) = sub.get_one::<u64>("interval") {
            config.tick_interval = Duration::from_millis(ms);
        }
        if sub.get_flag("no-wrap") {
            config.wrap_angles = false;
        }
        config.obj_path = sub.get_one::<PathBuf>("model").cloned();
        config.mtl_path = sub.get_one::<PathBuf>("mtl").cloned();
        if let Some(log) = sub.get_one::<PathBuf>("log") {
            config.log_file = log.clone();
        }
        config.log_level = match sub.get_count("verbose") {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        config
    }
}

fn existing_file(s: &str) -> Result<PathBuf, String> {
    let path = Path::new(s);
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(format!("no such file: {s}"))
    }
}

pub fn create_clap_command() -> Command {
    Command::new("ferret")
        .about("Spinning flat-shaded OBJ models, drawn back to front")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(
            Command::new("render")
                .about("Render a model in a window (minifb) or in the terminal")
                .arg(
                    Arg::new("mode")
                        .short('m')
                        .long("mode")
                        .value_name("MODE")
                        .help("Where to draw ('window', 'terminal', 'w', or 't')")
                        .value_parser(["window", "terminal", "w", "t"]),
                )
                .arg(
                    Arg::new("model")
                        .short('f')
                        .long("model")
                        .value_name("OBJ")
                        .help("OBJ file to render. A built-in cube is used when omitted.")
                        .value_parser(existing_file),
                )
                .arg(
                    Arg::new("mtl")
                        .long("mtl")
                        .value_name("MTL")
                        .help("Material file. Defaults to the .mtl next to the model.")
                        .value_parser(existing_file),
                )
                .arg(
                    Arg::new("size")
                        .short('s')
                        .long("size")
                        .value_name("PIXELS")
                        .help("Window width and height")
                        .value_parser(value_parser!(u32).range(16..=4096)),
                )
                .arg(
                    Arg::new("fov")
                        .long("fov")
                        .value_name("SCALAR")
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    Arg::new("distance")
                        .short('d')
                        .long("distance")
                        .value_name("SCALAR")
                        .help("Viewer distance from the model origin")
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    Arg::new("color")
                        .short('c')
                        .long("color")
                        .value_name("HEX")
                        .help("Fill color for faces without a known material")
                        .value_parser(Color::from_hex),
                )
                .arg(
                    Arg::new("interval")
                        .long("interval")
                        .value_name("MS")
                        .help("Delay between frames")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("no-wrap")
                        .long("no-wrap")
                        .help("Let rotation angles grow without reducing them modulo 2π")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("log")
                        .long("log")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("verbose")
                        .short('v')
                        .action(ArgAction::Count)
                        .help("More logging (-v debug, -vv trace)"),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let matches = create_clap_command()
            .try_get_matches_from(args)
            .expect("arguments should parse");
        Config::from_matches(&matches)
    }

    #[test]
    fn no_subcommand_uses_defaults() {
        assert_eq!(parse(&["ferret"]), Config::default());
    }

    #[test]
    fn render_flags_override_defaults() {
        let config = parse(&[
            "ferret", "render", "-m", "t", "--fov", "45", "-d", "12.5", "-c", "#00ff00",
            "--size", "300", "--no-wrap", "-vv",
        ]);
        assert_eq!(config.target, RenderTarget::Terminal);
        assert_eq!(config.fov, 45.0);
        assert_eq!(config.viewer_distance, 12.5);
        assert_eq!(config.default_color, Color::GREEN);
        assert_eq!(config.size, 300);
        assert!(!config.wrap_angles);
        assert_eq!(config.log_level, LevelFilter::Trace);
        assert_eq!(config.view(config.size).width, 300);
    }

    #[test]
    fn rejects_bad_values() {
        let cmd = create_clap_command;
        assert!(cmd()
            .try_get_matches_from(["ferret", "render", "-c", "#12"])
            .is_err());
        assert!(cmd()
            .try_get_matches_from(["ferret", "render", "-m", "vga"])
            .is_err());
        assert!(cmd()
            .try_get_matches_from(["ferret", "render", "-f", "/nonexistent/x.obj"])
            .is_err());
    }

    #[test]
    fn no_model_means_no_materials() {
        assert_eq!(Config::default().resolved_mtl_path(), None);
    }
}
