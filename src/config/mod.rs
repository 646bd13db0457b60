//! Configuration management for `spritefix.toml`.
//!
//! The config file is optional: without one, every section uses its
//! defaults and the current directory is the project root.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [fill] [scan] [backup]
//! ├── types/         # ConfigError, ConfigDiagnostics
//! ├── util.rs        # upward config file search
//! └── mod.rs         # SpriteConfig (this file)
//! ```
//!
//! # Precedence
//!
//! CLI flags > `spritefix.toml` > built-in defaults.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BackupConfig, FillConfig, ScanConfig};
pub use types::{ConfigDiagnostics, ConfigError};

use crate::{
    cli::{Cli, Commands, ScanArgs},
    log,
    utils::path::{expand_path, normalize_path},
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file searched for when `--config` is not given.
pub const DEFAULT_CONFIG_NAME: &str = "spritefix.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing spritefix.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpriteConfig {
    /// Absolute path to the config file, if one was loaded (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root directory - parent of config file or cwd (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Hole fill settings
    #[serde(default)]
    pub fill: FillConfig,

    /// Sprite discovery settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Backup settings
    #[serde(default)]
    pub backup: BackupConfig,
}

impl SpriteConfig {
    /// Load configuration for the parsed CLI.
    ///
    /// An explicit `--config` must exist. Otherwise the default name is
    /// searched upward from cwd, and a missing file means defaults.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let config_path = match &cli.config {
            Some(path) => {
                let path = cwd.join(path);
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path).into());
                }
                Some(path)
            }
            None => find_config_file(Path::new(DEFAULT_CONFIG_NAME)),
        };

        let mut config = match &config_path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };

        let root = config_path
            .as_deref()
            .and_then(Path::parent)
            .map_or_else(|| cwd.clone(), Path::to_path_buf);

        config.config_path = config_path.as_deref().map(normalize_path);
        config.normalize_paths(&root);
        config.apply_command_options(&cli.command, &cwd);
        config.validate()?;

        if let Some(path) = &config.config_path {
            crate::debug!("config"; "loaded {}", path.display());
        }
        crate::debug!("config"; "root: {}", config.get_root().display());
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve config-relative paths against `root`.
    fn normalize_paths(&mut self, root: &Path) {
        self.root = normalize_path(root);
        self.scan.dir = normalize_path(&self.root.join(&self.scan.dir));
        self.scan.normalize();
        self.backup.dir = expand_path(&self.backup.dir, &self.root);
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    ///
    /// Paths given on the command line are relative to `cwd`, not the root.
    fn apply_command_options(&mut self, command: &Commands, cwd: &Path) {
        self.apply_scan_args(command.scan_args());
        match command {
            Commands::Fix { args } => {
                Self::update_option(&mut self.fill.color, args.fill_color.as_ref());
                if let Some(dir) = &args.backup_dir {
                    self.backup.dir = expand_path(dir, cwd);
                    self.backup.enable = true;
                }
                if args.no_backup || args.dry_run {
                    self.backup.enable = false;
                }
            }
            Commands::Check { .. } => {
                // Check never writes.
                self.backup.enable = false;
            }
        }
    }

    fn apply_scan_args(&mut self, args: &ScanArgs) {
        Self::update_option(&mut self.scan.recursive, args.recursive.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, collecting all errors at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.scan.validate(&mut diag);
        self.backup.validate(&self.scan, &mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SpriteConfig {
    let (parsed, ignored) = SpriteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
