//! Terminal input.
//!
//! Maps `crossterm` key events onto player [`Control`](types::Control)s and
//! rebuilds per-tick key state from them, including on terminals that never
//! report key releases.

pub mod handler;
pub mod map;
pub mod source;

pub use term_dungeon_types as types;

pub use handler::{InputFrame, KeyState, MAX_PRESSES_PER_FRAME};
pub use map::{bindings_help, control_for_key, handle_key_event, should_quit, BINDINGS};
pub use source::TerminalInput;
