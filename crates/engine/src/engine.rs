//! Engine: player state, per-tick update and frame production.

use std::time::Duration;

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::core::{apply_intent, AssetError, Intent, Player, RayHit, Raycaster, World};
use crate::input::InputFrame;
use crate::term::{FrameBuffer, SceneFrame, SceneView, Viewport};
use crate::types::{Control, MAX_FRAME_DT_MS};

/// Startup failure. Nothing has touched the terminal yet when these occur.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("spawn point ({x}, {y}) is inside a wall or off the map")]
    SpawnInWall { x: f64, y: f64 },

    #[error("map has no empty cell to spawn in")]
    NoSpawn,

    #[error(transparent)]
    Asset(#[from] AssetError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Init,
    Running,
    Terminating,
}

pub struct Engine {
    world: World,
    player: Player,
    config: EngineConfig,
    state: LoopState,
    textures: bool,
    /// Translation locked in at take-off, reused while airborne.
    takeoff: Option<Intent>,
    ticks: u64,
    raycaster: Raycaster,
    view: SceneView,
    fb: FrameBuffer,
}

impl Engine {
    /// Validate the world, place the player and allocate frame buffers.
    pub fn new(world: World, config: EngineConfig) -> Result<Self, EngineError> {
        world.validate()?;

        let spawn = match config.spawn {
            Some(spawn) => spawn,
            None => world.map.default_spawn().ok_or(EngineError::NoSpawn)?,
        };
        if world.map.is_wall_at(spawn) {
            return Err(EngineError::SpawnInWall {
                x: spawn.x,
                y: spawn.y,
            });
        }

        let player = Player::new(spawn, config.heading_deg.to_radians(), config.fov);
        info!(
            x = spawn.x,
            y = spawn.y,
            heading_deg = config.heading_deg,
            fov = player.fov(),
            "player spawned"
        );

        Ok(Self {
            world,
            player,
            textures: config.textures,
            config,
            state: LoopState::Init,
            takeoff: None,
            ticks: 0,
            raycaster: Raycaster::new(),
            view: SceneView::new(),
            fb: FrameBuffer::new(0, 0),
        })
    }

    pub fn start(&mut self) {
        if self.state == LoopState::Init {
            self.state = LoopState::Running;
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn textures_enabled(&self) -> bool {
        self.textures
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn toggle_textures(&mut self) {
        self.textures = !self.textures;
        info!(enabled = self.textures, "textures toggled");
    }

    /// Apply one tick of input. `dt` is clamped to `MAX_FRAME_DT_MS`.
    ///
    /// A quit request moves the engine to `Terminating` and nothing else in
    /// the frame is applied.
    pub fn update(&mut self, input: &InputFrame, dt: Duration) {
        if self.state != LoopState::Running {
            return;
        }
        self.ticks += 1;

        if input.quit_requested() {
            self.state = LoopState::Terminating;
            info!(tick = self.ticks, "quit requested");
            return;
        }

        for _ in 0..input.press_count(Control::ToggleTextures) {
            self.toggle_textures();
        }

        let dt = dt
            .min(Duration::from_millis(MAX_FRAME_DT_MS as u64))
            .as_secs_f64();
        let live = Intent::from_controls(input.held);

        if input.was_pressed(Control::Jump) && self.player.jump() {
            self.takeoff = Some(live.translation_only());
            debug!(tick = self.ticks, "jump");
        }
        let intent = match self.takeoff {
            Some(takeoff) if self.player.is_jumping() => Intent {
                turn: live.turn,
                ..takeoff
            },
            _ => live,
        };

        apply_intent(
            &mut self.player,
            &self.world.map,
            intent,
            self.config.tuning,
            dt,
        );
        self.player.advance(dt);
        if !self.player.is_jumping() {
            self.takeoff = None;
        }
    }

    /// Cast one ray per column and draw the scene.
    pub fn render(&mut self, viewport: Viewport) -> &mut FrameBuffer {
        let hits = self
            .raycaster
            .cast(&self.world.map, &self.player, viewport.width as usize);
        let frame = SceneFrame {
            world: &self.world,
            player: &self.player,
            hits,
            textures: self.textures,
            minimap: self.config.minimap,
        };
        self.view.render_into(&frame, viewport, &mut self.fb);
        &mut self.fb
    }

    /// Ray results from the last `render`.
    pub fn hits(&self) -> &[Option<RayHit>] {
        self.raycaster.hits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Map;
    use crate::types::Vec2;

    fn engine_in_room() -> Engine {
        let world = World::from_map(Map::bordered(10, 10, 1));
        let config = EngineConfig {
            spawn: Some(Vec2::new(5.0, 5.0)),
            ..EngineConfig::default()
        };
        let mut engine = Engine::new(world, config).unwrap();
        engine.start();
        engine
    }

    #[test]
    fn new_engine_starts_in_init() {
        let world = World::from_map(Map::bordered(10, 10, 1));
        let engine = Engine::new(world, EngineConfig::default()).unwrap();
        assert_eq!(engine.state(), LoopState::Init);
        assert_eq!(engine.player().pos(), Vec2::new(5.5, 5.5));
    }

    #[test]
    fn spawn_inside_wall_is_rejected() {
        let world = World::from_map(Map::bordered(10, 10, 1));
        let config = EngineConfig {
            spawn: Some(Vec2::new(0.5, 0.5)),
            ..EngineConfig::default()
        };
        assert!(matches!(
            Engine::new(world, config),
            Err(EngineError::SpawnInWall { .. })
        ));
    }

    #[test]
    fn solid_map_has_no_spawn() {
        let world = World::from_map(Map::parse("111\n111").unwrap());
        assert!(matches!(
            Engine::new(world, EngineConfig::default()),
            Err(EngineError::NoSpawn)
        ));
    }

    #[test]
    fn update_is_ignored_until_started() {
        let world = World::from_map(Map::bordered(10, 10, 1));
        let mut engine = Engine::new(world, EngineConfig::default()).unwrap();
        engine.update(
            &InputFrame::pressing(&[Control::Quit]),
            Duration::from_millis(16),
        );
        assert_eq!(engine.state(), LoopState::Init);
        assert_eq!(engine.ticks(), 0);
    }

    #[test]
    fn quit_terminates_without_moving() {
        let mut engine = engine_in_room();
        let mut input = InputFrame::pressing(&[Control::Quit]);
        input.held.insert(Control::Forward);
        engine.update(&input, Duration::from_millis(50));
        assert_eq!(engine.state(), LoopState::Terminating);
        assert_eq!(engine.player().pos(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn each_toggle_press_flips_textures() {
        let mut engine = engine_in_room();
        assert!(engine.textures_enabled());

        engine.update(
            &InputFrame::pressing(&[Control::ToggleTextures]),
            Duration::ZERO,
        );
        assert!(!engine.textures_enabled());

        // Held without a new press: no flip.
        engine.update(
            &InputFrame::holding(&[Control::ToggleTextures]),
            Duration::ZERO,
        );
        assert!(!engine.textures_enabled());

        engine.update(
            &InputFrame::pressing(&[Control::ToggleTextures, Control::ToggleTextures]),
            Duration::ZERO,
        );
        assert!(!engine.textures_enabled());
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut engine = engine_in_room();
        engine.update(
            &InputFrame::holding(&[Control::Forward]),
            Duration::from_secs(10),
        );
        let moved = engine.player().pos().x - 5.0;
        let max = engine.config().tuning.move_speed * MAX_FRAME_DT_MS as f64 / 1000.0;
        assert!((moved - max).abs() < 1e-9);
    }

    #[test]
    fn airborne_player_keeps_takeoff_translation() {
        let mut engine = engine_in_room();
        let step = Duration::from_millis(20);

        engine.update(&InputFrame::pressing(&[Control::Jump]), step);
        assert!(engine.player().is_jumping());
        assert!(engine.player().z() > 0.0);

        // Take-off was standing still; pressing forward mid-air does nothing.
        engine.update(&InputFrame::holding(&[Control::Forward]), step);
        assert_eq!(engine.player().pos(), Vec2::new(5.0, 5.0));

        // Turning still works while airborne.
        let dir = engine.player().dir();
        engine.update(&InputFrame::holding(&[Control::TurnRight]), step);
        assert_ne!(engine.player().dir(), dir);

        // Land, then forward moves again.
        for _ in 0..40 {
            engine.update(&InputFrame::idle(), step);
        }
        assert!(!engine.player().is_jumping());
        assert_eq!(engine.player().z(), 0.0);
        let before = engine.player().pos();
        engine.update(&InputFrame::holding(&[Control::Forward]), step);
        assert_ne!(engine.player().pos(), before);
    }

    #[test]
    fn render_fills_the_viewport() {
        let mut engine = engine_in_room();
        let fb = engine.render(Viewport::new(40, 12));
        assert_eq!((fb.width(), fb.height()), (40, 12));
        assert_eq!(engine.hits().len(), 40);
        assert!(engine.hits().iter().all(Option::is_some));
    }
}
