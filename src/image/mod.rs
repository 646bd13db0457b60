//! Image processing.
//!
//! # Modules
//!
//! - [`holes`]: interior hole detection and filling

pub mod holes;
