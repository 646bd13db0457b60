//! `[backup]` section configuration.
//!
//! Every sprite is copied here before `fix` touches it.
//!
//! # Example
//!
//! ```toml
//! [backup]
//! enable = true
//! dir = "~/.cache/sprites-backup"   # `~` is expanded, relative paths use the config dir
//! ```

use std::path::PathBuf;

use serde::Deserialize;

use crate::config::ConfigDiagnostics;
use crate::config::section::ScanConfig;

/// Backup settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Copy each sprite before modifying it.
    pub enable: bool,

    /// Backup directory. Sprites keep their path relative to the scan root.
    pub dir: PathBuf,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enable: true,
            dir: std::env::temp_dir().join("sprites-backup"),
        }
    }
}

impl BackupConfig {
    /// Backups must never land where they would be scanned (or overwritten) again.
    pub fn validate(&self, scan: &ScanConfig, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }

        if self.dir == scan.dir {
            diag.error_with_hint(
                "backup.dir",
                "backup directory is the sprite directory",
                "point `backup.dir` somewhere else or set `enable = false`",
            );
        } else if scan.recursive && self.dir.starts_with(&scan.dir) {
            diag.error_with_hint(
                "backup.dir",
                "backup directory is inside a recursively scanned sprite directory",
                "backups would be picked up as sprites on the next run",
            );
        }
    }
}
