//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::image::holes::FillColor;

/// Repair sprite transparency: fill holes that background removal punched
/// into the subject, keep the real background transparent.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: search upward for spritefix.toml)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fill interior holes in sprites (backs up each file first)
    #[command(visible_alias = "f")]
    Fix {
        #[command(flatten)]
        args: FixArgs,
    },

    /// Report sprites with interior holes without modifying anything
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },
}

/// Sprite selection shared by Fix and Check.
#[derive(clap::Args, Debug, Clone)]
pub struct ScanArgs {
    /// Sprite files or directories. If omitted, scans `[scan] dir`.
    /// Use `-` to read paths from stdin.
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub recursive: Option<bool>,
}

/// Fix command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct FixArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Color written into holes, as `#rrggbb`
    #[arg(short, long, value_name = "HEX")]
    pub fill_color: Option<FillColor>,

    /// Directory that receives a copy of every sprite before it is fixed
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub backup_dir: Option<PathBuf>,

    /// Do not back up sprites before fixing them
    #[arg(long, conflicts_with = "backup_dir")]
    pub no_backup: bool,

    /// Count holes but write nothing (no backups, no changes)
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Exit with an error when any sprite has holes
    #[arg(short, long)]
    pub strict: bool,
}

impl Commands {
    /// Sprite selection of the active command.
    pub const fn scan_args(&self) -> &ScanArgs {
        match self {
            Self::Fix { args } => &args.scan,
            Self::Check { args } => &args.scan,
        }
    }
}
