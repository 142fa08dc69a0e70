//! Terminal rendering.
//!
//! A small, game-oriented rendering layer: the scene is drawn into a plain
//! framebuffer of styled character cells, which is then flushed to the
//! terminal as a diff against the previous frame. No widget toolkit.
//!
//! - [`scene_view`]: pure mapping from rays, sprites and player to cells
//! - [`renderer`]: diff encoding and flushing via crossterm
//! - [`session`]: raw mode / alternate screen as a scoped resource

pub mod fb;
pub mod renderer;
pub mod scene_view;
pub mod session;

pub use term_dungeon_core as core;
pub use term_dungeon_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{collect_runs, encode_frame_into, DrawStats, Run, TerminalRenderer};
pub use scene_view::{distance_brightness, heading_arrow, SceneFrame, SceneView, Viewport, SHADE_RAMP};
pub use session::TerminalSession;
