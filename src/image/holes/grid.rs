//! Flat indexing over row-major RGBA buffers of any channel depth.

use image::{ImageBuffer, Primitive, Rgba};

/// RGBA buffer with `P` channels (`u8`, `u16` or `f32`).
pub type RgbaBuffer<P> = ImageBuffer<Rgba<P>, Vec<P>>;

/// Channels per RGBA pixel.
const CHANNELS: usize = 4;

/// Channel type the hole filler can write.
///
/// Alpha equal to `DEFAULT_MIN_VALUE` is transparent. Nothing else counts.
pub trait Channel: Primitive {
    /// Scale an 8-bit channel value to this depth.
    fn from_u8(value: u8) -> Self;
}

impl Channel for u8 {
    fn from_u8(value: u8) -> Self {
        value
    }
}

impl Channel for u16 {
    fn from_u8(value: u8) -> Self {
        u16::from(value) * 257
    }
}

impl Channel for f32 {
    fn from_u8(value: u8) -> Self {
        f32::from(value) / 255.0
    }
}

#[inline]
pub(super) fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

#[inline]
pub(super) fn is_transparent<P: Primitive>(raw: &[P], idx: usize) -> bool {
    raw[idx * CHANNELS + CHANNELS - 1] == P::DEFAULT_MIN_VALUE
}

#[inline]
pub(super) fn is_clear<P: Primitive>(pixel: &Rgba<P>) -> bool {
    pixel.0[CHANNELS - 1] == P::DEFAULT_MIN_VALUE
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    #[test]
    fn index_is_row_major() {
        assert_eq!(pixel_index(5, 0, 0), 0);
        assert_eq!(pixel_index(5, 4, 0), 4);
        assert_eq!(pixel_index(5, 0, 1), 5);
        assert_eq!(pixel_index(5, 3, 2), 13);
    }

    #[test]
    fn reads_alpha_channel_only() {
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0, 255]));
        img.put_pixel(2, 1, Rgba([255, 255, 255, 0]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 1]));

        let raw = img.as_raw();
        assert!(is_transparent(raw, pixel_index(3, 2, 1)));
        assert!(!is_transparent(raw, pixel_index(3, 1, 0)));
        assert!(!is_transparent(raw, pixel_index(3, 0, 0)));
    }

    #[test]
    fn faint_alpha_is_opaque_at_every_depth() {
        assert!(!is_clear(&Rgba([0u16, 0, 0, 1])));
        assert!(is_clear(&Rgba([9u16, 9, 9, 0])));
        assert!(!is_clear(&Rgba([0.0f32, 0.0, 0.0, 1e-6])));
        assert!(is_clear(&Rgba([1.0f32, 1.0, 1.0, 0.0])));
    }

    #[test]
    fn channels_scale_from_eight_bit() {
        assert_eq!(u8::from_u8(200), 200);
        assert_eq!(u16::from_u8(255), u16::MAX);
        assert_eq!(u16::from_u8(1), 257);
        assert_eq!(f32::from_u8(255), 1.0);
        assert_eq!(f32::from_u8(0), 0.0);
    }
}
