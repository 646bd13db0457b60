use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use thiserror::Error;

use crate::image::holes::fill::FillColor;
use crate::image::holes::{hole_count, repair};
use crate::utils::path::normalize_path;

/// Failures around the core: it never runs on an image that did not decode.
#[derive(Debug, Error)]
pub enum RepairError {
    #[error("failed to decode `{0}`")]
    Decode(PathBuf, #[source] image::ImageError),

    #[error("failed to encode `{0}`")]
    Encode(PathBuf, #[source] image::ImageError),

    #[error("IO error at `{0}`")]
    Io(PathBuf, #[source] io::Error),
}

/// Fill interior holes of `input` and write the result to `output`.
///
/// The output format follows the output extension and the color type of
/// the input is kept. When nothing was filled and the image would be written
/// back over itself, the file is left alone.
pub fn repair_file(input: &Path, output: &Path, color: FillColor) -> Result<usize, RepairError> {
    let (img, filled) = repair_image(decode(input)?, color);

    if filled == 0 && normalize_path(input) == normalize_path(output) {
        return Ok(0);
    }

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| RepairError::Io(parent.to_path_buf(), err))?;
    }

    img.save(output)
        .map_err(|err| RepairError::Encode(output.to_path_buf(), err))?;
    Ok(filled)
}

/// Count interior holes in `path` without writing anything.
pub fn inspect_file(path: &Path) -> Result<usize, RepairError> {
    Ok(image_hole_count(&decode(path)?))
}

/// Fill holes in the image's own color type.
///
/// Gray+alpha images go through RGBA of the same depth, which converts
/// gray values back exactly. Images without alpha have no holes.
pub fn repair_image(img: DynamicImage, color: FillColor) -> (DynamicImage, usize) {
    match img {
        DynamicImage::ImageRgba8(mut buf) => {
            let filled = repair(&mut buf, color);
            (buf.into(), filled)
        }
        DynamicImage::ImageRgba16(mut buf) => {
            let filled = repair(&mut buf, color);
            (buf.into(), filled)
        }
        DynamicImage::ImageRgba32F(mut buf) => {
            let filled = repair(&mut buf, color);
            (buf.into(), filled)
        }
        gray @ DynamicImage::ImageLumaA8(_) => {
            let mut buf = gray.to_rgba8();
            match repair(&mut buf, color) {
                0 => (gray, 0),
                filled => (DynamicImage::from(buf).into_luma_alpha8().into(), filled),
            }
        }
        gray @ DynamicImage::ImageLumaA16(_) => {
            let mut buf = gray.to_rgba16();
            match repair(&mut buf, color) {
                0 => (gray, 0),
                filled => (DynamicImage::from(buf).into_luma_alpha16().into(), filled),
            }
        }
        opaque => (opaque, 0),
    }
}

/// Number of interior holes, counted at the image's own depth.
fn image_hole_count(img: &DynamicImage) -> usize {
    match img {
        DynamicImage::ImageRgba8(buf) => hole_count(buf),
        DynamicImage::ImageRgba16(buf) => hole_count(buf),
        DynamicImage::ImageRgba32F(buf) => hole_count(buf),
        DynamicImage::ImageLumaA8(_) => hole_count(&img.to_rgba8()),
        DynamicImage::ImageLumaA16(_) => hole_count(&img.to_rgba16()),
        _ => 0,
    }
}

fn decode(path: &Path) -> Result<DynamicImage, RepairError> {
    image::open(path).map_err(|err| RepairError::Decode(path.to_path_buf(), err))
}
