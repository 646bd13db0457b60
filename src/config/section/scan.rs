//! `[scan]` section configuration.
//!
//! Controls which sprites `fix` and `check` pick up when no paths are given.
//!
//! # Example
//!
//! ```toml
//! [scan]
//! dir = "assets/sprites"    # Sprite directory (relative to config file)
//! extensions = ["png"]      # File extensions to process (case-insensitive)
//! recursive = false         # Descend into subdirectories
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::ConfigDiagnostics;

/// Formats that decode and encode with an alpha channel, losslessly.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "webp"];

/// Sprite discovery settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory scanned when no paths are passed on the command line.
    pub dir: PathBuf,

    /// File extensions to process, without the leading dot.
    pub extensions: Vec<String>,

    /// Walk subdirectories too.
    pub recursive: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            extensions: vec!["png".to_string()],
            recursive: false,
        }
    }
}

impl ScanConfig {
    /// Lowercase extensions and strip leading dots.
    pub fn normalize(&mut self) {
        for ext in &mut self.extensions {
            *ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
        }
        self.extensions.retain(|ext| !ext.is_empty());
        self.extensions.dedup();
    }

    /// Whether `path` has one of the configured extensions.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.extensions.is_empty() {
            diag.error_with_hint(
                "scan.extensions",
                "no file extensions to scan",
                "set `extensions = [\"png\"]`",
            );
        }

        for ext in &self.extensions {
            if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
                diag.error_with_hint(
                    "scan.extensions",
                    format!("unsupported sprite format `{ext}`"),
                    format!("supported: {}", SUPPORTED_EXTENSIONS.join(", ")),
                );
            }
        }
    }
}
