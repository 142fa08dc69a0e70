//! term-dungeon (workspace facade crate).
//!
//! Re-exports the component crates under `term_dungeon::{core,engine,input,term,types}`
//! and hosts the command-line front end shared by the binary and the
//! integration tests.

pub mod cli;
pub mod logging;

pub use term_dungeon_core as core;
pub use term_dungeon_engine as engine;
pub use term_dungeon_input as input;
pub use term_dungeon_term as term;
pub use term_dungeon_types as types;
