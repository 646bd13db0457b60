use std::fmt;
use std::str::FromStr;

use image::{Pixel, Rgba};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::image::holes::classify::ReachabilitySet;
use crate::image::holes::grid::{Channel, RgbaBuffer, is_clear};

/// Opaque color written into interior holes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl FillColor {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The pixel written for a hole at channel depth `P`. Always fully opaque.
    #[inline]
    pub fn to_pixel<P: Channel>(self) -> Rgba<P> {
        Rgba([
            P::from_u8(self.r),
            P::from_u8(self.g),
            P::from_u8(self.b),
            P::DEFAULT_MAX_VALUE,
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid fill color `{0}`, expected `#rrggbb`")]
pub struct ParseColorError(String);

impl FromStr for FillColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ParseColorError(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
        match (channel(0..2), channel(2..4), channel(4..6)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self::new(r, g, b)),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

impl fmt::Display for FillColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl<'de> Deserialize<'de> for FillColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Overwrite every transparent pixel that is not background with `color`.
///
/// Returns the number of pixels written. Opaque pixels and background
/// pixels are left untouched, so a second pass over the result fills nothing.
pub fn fill_holes<P>(img: &mut RgbaBuffer<P>, reachability: &ReachabilitySet, color: FillColor) -> usize
where
    P: Channel,
    Rgba<P>: Pixel<Subpixel = P>,
{
    debug_assert_eq!(
        img.dimensions(),
        (reachability.width(), reachability.height())
    );

    let fill = color.to_pixel::<P>();
    let mut filled = 0;
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        if is_clear(pixel) && !reachability.is_background(x, y) {
            *pixel = fill;
            filled += 1;
        }
    }
    filled
}

/// Count the pixels [`fill_holes`] would write, without touching the image.
pub fn count_holes<P>(img: &RgbaBuffer<P>, reachability: &ReachabilitySet) -> usize
where
    P: Channel,
    Rgba<P>: Pixel<Subpixel = P>,
{
    img.enumerate_pixels()
        .filter(|(x, y, pixel)| is_clear(*pixel) && !reachability.is_background(*x, *y))
        .count()
}
