//! `[fill]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [fill]
//! color = "#000000"   # Opaque color written into interior holes
//! ```

use serde::Deserialize;

use crate::image::holes::FillColor;

/// Hole fill settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// Color for interior holes, `#rrggbb`. Alpha is always 255.
    pub color: FillColor,
}
