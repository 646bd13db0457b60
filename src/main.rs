//! spritefix - fill holes that background removal punched into sprites.

mod cli;
mod config;
mod core;
mod image;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SpriteConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SpriteConfig::load(&cli)?;

    match &cli.command {
        Commands::Fix { args } => cli::fix::run_fix(args, &config),
        Commands::Check { args } => cli::check::run_check(args, &config),
    }
}
