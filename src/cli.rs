//! Command-line arguments.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::core::{MovementTuning, World};
use crate::engine::EngineConfig;
use crate::input::{bindings_help, KeyState};
use crate::types::{Vec2, DEFAULT_FOV, DEFAULT_HOLD_MS, DEFAULT_MOVE_SPEED, DEFAULT_TURN_SPEED};

/// Name of the built-in map.
pub const EMBEDDED_MAP: &str = "dungeon";

/// Walk around a textured dungeon in your terminal.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "term-dungeon", version, after_help = bindings_help())]
pub struct Args {
    /// Asset directory with maps/, wall_textures/ and sprite_textures/.
    /// The built-in dungeon is used when omitted.
    #[arg(long, env = "TERM_DUNGEON_ASSETS", value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Map to load from the asset directory
    #[arg(long, default_value = EMBEDDED_MAP, value_name = "NAME")]
    pub map: String,

    /// Target frame rate
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: Option<u32>,

    /// Camera plane length (field of view), 0 to 1
    #[arg(long, default_value_t = DEFAULT_FOV, value_parser = parse_fov)]
    pub fov: f64,

    /// Movement speed in cells per second
    #[arg(long, default_value_t = DEFAULT_MOVE_SPEED, value_parser = parse_speed)]
    pub move_speed: f64,

    /// Turn speed in radians per second
    #[arg(long, default_value_t = DEFAULT_TURN_SPEED, value_parser = parse_speed)]
    pub turn_speed: f64,

    /// Start position; defaults to the map centre
    #[arg(long, value_name = "X,Y", value_parser = parse_spawn)]
    pub spawn: Option<Vec2>,

    /// Initial heading in degrees, clockwise from east
    #[arg(
        long,
        default_value_t = 0.0,
        allow_negative_numbers = true,
        value_name = "DEG",
        value_parser = parse_heading
    )]
    pub heading: f64,

    /// Start with flat-shaded walls
    #[arg(long)]
    pub no_textures: bool,

    /// Hide the minimap
    #[arg(long)]
    pub no_minimap: bool,

    /// How long a key counts as held without release events
    #[arg(long, default_value_t = DEFAULT_HOLD_MS, value_name = "MS")]
    pub hold_ms: u32,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long, env = "TERM_DUNGEON_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter when TERM_DUNGEON_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    pub log_level: String,
}

impl Args {
    pub fn engine_config(&self) -> EngineConfig {
        let config = EngineConfig {
            fov: self.fov,
            tuning: MovementTuning {
                move_speed: self.move_speed,
                turn_speed: self.turn_speed,
            },
            spawn: self.spawn,
            heading_deg: self.heading,
            textures: !self.no_textures,
            minimap: !self.no_minimap,
            ..EngineConfig::default()
        };
        match self.fps {
            Some(fps) => config.with_fps(fps),
            None => config,
        }
    }

    /// Key state for a terminal that does (or does not) report releases.
    pub fn key_state(&self, release_events: bool) -> KeyState {
        KeyState::with_hold_timeout_ms(self.hold_ms).with_release_events(release_events)
    }

    /// Load the world from `--assets`, or the built-in one.
    pub fn load_world(&self) -> Result<World> {
        match &self.assets {
            Some(dir) => World::load(dir, &self.map)
                .with_context(|| format!("failed to load map {:?} from {}", self.map, dir.display())),
            None if self.map == EMBEDDED_MAP => {
                World::embedded().context("built-in assets are invalid")
            }
            None => bail!(
                "map {:?} is not built in; pass --assets DIR to load it",
                self.map
            ),
        }
    }
}

fn parse_spawn(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid coordinate {v:?}"))
    };
    Ok(Vec2::new(coord(x)?, coord(y)?))
}

fn parse_fov(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if (0.0..=1.0).contains(&v) => Ok(v),
        _ => Err(format!("expected a number between 0 and 1, got {s:?}")),
    }
}

fn parse_heading(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("expected a finite angle in degrees, got {s:?}")),
    }
}

fn parse_speed(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(format!("expected a non-negative number, got {s:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("term-dungeon").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_match_engine_defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.map, EMBEDDED_MAP);
        assert_eq!(args.hold_ms, DEFAULT_HOLD_MS);
        let config = args.engine_config();
        assert_eq!(config.tick, EngineConfig::default().tick);
        assert_eq!(config.fov, DEFAULT_FOV);
        assert!(config.textures);
        assert!(config.minimap);
        assert_eq!(config.spawn, None);
    }

    #[test]
    fn overrides_reach_engine_config() {
        let args = parse(&[
            "--fps",
            "25",
            "--fov",
            "0.5",
            "--move-speed",
            "2",
            "--spawn",
            "3.5, 4.25",
            "--heading",
            "-90",
            "--no-textures",
            "--no-minimap",
        ])
        .unwrap();
        let config = args.engine_config();
        assert_eq!(config.tick, Duration::from_millis(40));
        assert_eq!(config.fov, 0.5);
        assert_eq!(config.tuning.move_speed, 2.0);
        assert_eq!(config.spawn, Some(Vec2::new(3.5, 4.25)));
        assert_eq!(config.heading_deg, -90.0);
        assert!(!config.textures);
        assert!(!config.minimap);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(parse(&["--spawn", "3"]).is_err());
        assert!(parse(&["--spawn", "a,b"]).is_err());
        assert!(parse(&["--fov", "1.5"]).is_err());
        assert!(parse(&["--move-speed", "-1"]).is_err());
        assert!(parse(&["--fps", "0"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
    }

    #[test]
    fn heading_must_be_finite() {
        for bad in ["NaN", "inf", "infinity"] {
            assert!(parse(&["--heading", bad]).is_err(), "{bad} accepted");
        }
        assert!(parse(&["--heading=-inf"]).is_err());
        assert!(parse(&["--heading", "x"]).is_err());

        let args = parse(&["--heading=-45.5"]).unwrap();
        assert_eq!(args.heading, -45.5);
        assert_eq!(parse(&["--heading", "720"]).unwrap().heading, 720.0);
    }

    #[test]
    fn hold_ms_configures_key_state() {
        let args = parse(&["--hold-ms", "350"]).unwrap();
        let keys = args.key_state(true);
        assert_eq!(keys.hold_timeout(), Duration::from_millis(350));
        assert!(keys.release_events());
    }

    #[test]
    fn unknown_map_without_assets_is_an_error() {
        let args = parse(&["--map", "castle"]).unwrap();
        assert!(args.load_world().is_err());
    }

    #[test]
    fn builtin_world_loads() {
        let args = parse(&[]).unwrap();
        let world = args.load_world().unwrap();
        assert!(world.has_wall_textures());
    }
}
