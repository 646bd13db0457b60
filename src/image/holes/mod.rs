//! Fill interior holes in sprite transparency.
//!
//! Background removal sometimes clears pixels that belong to the subject
//! (eyes, shadows, dark outlines). Those pixels are transparent but not
//! reachable from the image border, so an edge-seeded flood fill tells
//! them apart from real background:
//!
//! 1. [`classify`] marks transparent pixels 8-connected to the border.
//! 2. [`fill_holes`] paints every other transparent pixel with a
//!    [`FillColor`].
//!
//! Both work on the decoded channel depth (8-bit, 16-bit or float), so a
//! faint 16-bit alpha is never rounded down to transparent.

mod classify;
mod fill;
pub mod grid;
mod process;

pub use classify::{ReachabilitySet, classify};
pub use fill::{FillColor, count_holes, fill_holes};
pub use process::{RepairError, inspect_file, repair_file};

use grid::{Channel, RgbaBuffer};
use image::{Pixel, Rgba};

/// Classify and fill in one step. Returns the number of holes filled.
pub fn repair<P>(img: &mut RgbaBuffer<P>, color: FillColor) -> usize
where
    P: Channel,
    Rgba<P>: Pixel<Subpixel = P>,
{
    let reachability = classify(img);
    fill_holes(img, &reachability, color)
}

/// Number of interior holes in `img`.
pub fn hole_count<P>(img: &RgbaBuffer<P>) -> usize
where
    P: Channel,
    Rgba<P>: Pixel<Subpixel = P>,
{
    count_holes(img, &classify(img))
}
