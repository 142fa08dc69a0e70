//! Frame loop and game state.
//!
//! [`Engine`] owns the player and the per-frame buffers; [`run`] drives it at
//! a fixed tick rate against an [`InputSource`] and a [`Surface`]. The
//! terminal implementations of both live in [`terminal`]; tests substitute
//! scripted ones.

pub mod config;
pub mod engine;
pub mod frame_loop;
pub mod terminal;

pub use term_dungeon_core as core;
pub use term_dungeon_input as input;
pub use term_dungeon_term as term;
pub use term_dungeon_types as types;

pub use config::EngineConfig;
pub use engine::{Engine, EngineError, LoopState};
pub use frame_loop::{run, InputSource, RunSummary, Surface};
pub use terminal::TerminalSurface;
