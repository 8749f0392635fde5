#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use anyhow::Context;
use chess_arbiter::Color;
use clap::Parser;
use tracing::{Level, info};

use crate::repl::repl;

mod board_display;
mod repl;

const DEFAULT_VERBOSITY: Level = if cfg!(debug_assertions) {
    Level::DEBUG
} else {
    Level::INFO
};

/// Play chess on the console, two players sharing one terminal.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Maximum level of diagnostics written to stderr.
    #[arg(short, long, value_name = "level", default_value_t = DEFAULT_VERBOSITY)]
    verbosity: Level,

    /// Side of the board drawn at the bottom.
    #[arg(long, value_name = "color", default_value_t = Color::White)]
    view: Color,
}

fn main() -> anyhow::Result<()> {
    let Cli { verbosity, view } = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(verbosity)
        .with_writer(std::io::stderr)
        .init();

    info!(%view, "starting");
    repl(view).context("console i/o failed")?;
    Ok(())
}
