//! Terminal dungeon runner (default binary).
//!
//! Loads assets, then hands the terminal to the frame loop until the player
//! quits. Asset and startup errors are reported before the terminal is
//! touched.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use term_dungeon::cli::Args;
use term_dungeon::engine::{run, Engine, TerminalSurface};
use term_dungeon::input::TerminalInput;
use term_dungeon::logging;
use term_dungeon::term::TerminalSession;

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref(), &args.log_level)?;

    let world = args.load_world()?;
    let mut engine = Engine::new(world, args.engine_config())?;

    let session = TerminalSession::enter()?;
    let mut input = TerminalInput::new(args.key_state(session.reports_key_release()));
    let mut surface = TerminalSurface::new();

    let result = run(&mut engine, &mut input, &mut surface);

    // Always try to restore terminal state before reporting anything.
    let restored = session.exit();
    let summary = result?;
    restored?;

    info!(ticks = summary.ticks, frames = summary.frames, "bye");
    Ok(())
}
