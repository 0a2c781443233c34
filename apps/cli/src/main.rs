//! mdattrs CLI: HTML attributes for Markdown images and links.
//!
//! Extracts attribute lists from titles and renders Markdown files with
//! those attributes applied to the generated tags.

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
