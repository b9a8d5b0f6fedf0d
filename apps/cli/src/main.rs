//! Scopewise CLI: scope recommendation engine for search implementations.
//!
//! Scores a client questionnaire against the feature catalog and prints or
//! writes a phased implementation plan as Markdown or JSON.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
