use image::{DynamicImage, GenericImageView, imageops::FilterType};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Bounding box has no area ({width}x{height})")]
    EmptyBox { width: u32, height: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// Compute the size of `(width, height)` shrunk to fit inside `bounds`.
///
/// Integer arithmetic rounded to the nearest pixel, one axis at a time, never
/// smaller than one pixel and never larger than the input.
pub fn fit_within(width: u32, height: u32, bounds: (u32, u32)) -> (u32, u32) {
    let (max_w, max_h) = bounds;
    let (mut w, mut h) = (u64::from(width), u64::from(height));

    if w > u64::from(max_w) {
        h = ((h * u64::from(max_w) + w / 2) / w).max(1);
        w = u64::from(max_w);
    }
    if h > u64::from(max_h) {
        w = ((w * u64::from(max_h) + h / 2) / h).max(1);
        h = u64::from(max_h);
    }

    // Both values are bounded by the u32 inputs.
    (w as u32, h as u32)
}

/// Shrink `img` to fit inside `bounds`, keeping its aspect ratio.
///
/// Images already inside the box come back as an unscaled copy.
pub fn thumbnail(img: &DynamicImage, bounds: (u32, u32)) -> Result<DynamicImage, ThumbnailError> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(ThumbnailError::EmptyImage { width, height });
    }
    if bounds.0 == 0 || bounds.1 == 0 {
        return Err(ThumbnailError::EmptyBox {
            width: bounds.0,
            height: bounds.1,
        });
    }

    let (new_width, new_height) = fit_within(width, height, bounds);
    if (new_width, new_height) == (width, height) {
        return Ok(img.clone());
    }

    // Lanczos3 for antialiased downsampling
    Ok(img.resize_exact(new_width, new_height, FilterType::Lanczos3))
}

/// Write `img` as a JPEG to `path`, whatever its extension.
pub fn save_jpeg(img: &DynamicImage, path: &Path, quality: u8) -> Result<(), ThumbnailError> {
    // JPEG has no alpha channel
    let rgb_img = img.to_rgb8();

    let mut output = fs::File::create(path)?;
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut output, quality);
    rgb_img.write_with_encoder(encoder)?;

    Ok(())
}
