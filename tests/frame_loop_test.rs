use std::collections::VecDeque;
use std::time::Instant;

use anyhow::Result;

use term_dungeon::core::{Map, World};
use term_dungeon::engine::{run, Engine, EngineConfig, InputSource, LoopState, Surface};
use term_dungeon::input::InputFrame;
use term_dungeon::term::{FrameBuffer, Viewport};
use term_dungeon::types::{Control, Vec2};

/// Replays one frame per tick, then idles.
struct ScriptedInput {
    frames: VecDeque<InputFrame>,
    polls: usize,
}

impl ScriptedInput {
    fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            polls: 0,
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<InputFrame> {
        self.polls += 1;
        Ok(self.frames.pop_front().unwrap_or_default())
    }

    fn idle_until(&mut self, deadline: Instant) -> Result<()> {
        std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingSurface {
    presented: usize,
    last_centre: Option<char>,
}

impl Surface for RecordingSurface {
    fn viewport(&mut self) -> Result<Viewport> {
        Ok(Viewport::new(40, 12))
    }

    fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.presented += 1;
        self.last_centre = fb.get(20, 6).map(|c| c.ch);
        Ok(())
    }
}

fn engine() -> Engine {
    let config = EngineConfig {
        spawn: Some(Vec2::new(5.0, 5.0)),
        ..EngineConfig::default()
    };
    Engine::new(World::from_map(Map::bordered(10, 10, 1)), config).unwrap()
}

#[test]
fn quit_on_tick_n_stops_before_rendering_it() {
    let mut engine = engine();
    let script = [
        InputFrame::idle(),
        InputFrame::holding(&[Control::Forward]),
        InputFrame::holding(&[Control::Forward]),
        InputFrame::pressing(&[Control::Quit]),
        InputFrame::holding(&[Control::Forward]),
    ];
    let mut input = ScriptedInput::new(script);
    let mut surface = RecordingSurface::default();

    let summary = run(&mut engine, &mut input, &mut surface).unwrap();

    assert_eq!(engine.state(), LoopState::Terminating);
    assert_eq!(summary.ticks, 4);
    assert_eq!(summary.frames, 3);
    assert_eq!(surface.presented, 3);
    // The frame after quit was never polled.
    assert_eq!(input.polls, 4);
    assert!(surface.last_centre.is_some());
    assert!(engine.player().pos().x > 5.0);
}

#[test]
fn quit_on_first_tick_presents_nothing() {
    let mut engine = engine();
    let mut input = ScriptedInput::new([InputFrame::pressing(&[Control::Quit])]);
    let mut surface = RecordingSurface::default();

    let summary = run(&mut engine, &mut input, &mut surface).unwrap();
    assert_eq!(summary.frames, 0);
    assert_eq!(surface.presented, 0);
    assert_eq!(engine.player().pos(), Vec2::new(5.0, 5.0));
}

#[test]
fn toggle_presses_flip_textures_between_frames() {
    let mut engine = engine();
    let mut input = ScriptedInput::new([
        InputFrame::pressing(&[Control::ToggleTextures]),
        InputFrame::idle(),
        InputFrame::pressing(&[Control::Quit]),
    ]);
    let mut surface = RecordingSurface::default();

    run(&mut engine, &mut input, &mut surface).unwrap();
    assert!(!engine.textures_enabled());
    assert_eq!(surface.presented, 2);
}

struct FailingSurface;

impl Surface for FailingSurface {
    fn viewport(&mut self) -> Result<Viewport> {
        anyhow::bail!("terminal went away")
    }

    fn present(&mut self, _fb: &mut FrameBuffer) -> Result<()> {
        Ok(())
    }
}

#[test]
fn surface_errors_end_the_loop() {
    let mut engine = engine();
    let mut input = ScriptedInput::new([]);
    let err = run(&mut engine, &mut input, &mut FailingSurface).unwrap_err();
    assert!(err.to_string().contains("terminal went away"));
}
