use image::{DynamicImage, ImageFormat};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use crate::config::NormConfig;
use crate::core::grayscale::{samples, to_grayscale};
use crate::core::loader::{LoadError, load_image};
use crate::core::normalize::normalize;
use crate::core::thumbnail::{save_jpeg, thumbnail};

/// Quality used for the intermediate thumbnail files.
const INTERMEDIATE_JPEG_QUALITY: u8 = 75;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Sample counts differ: {left} vs {right}")]
    ShapeMismatch { left: usize, right: usize },

    #[error("Nothing to compare")]
    Empty,
}

/// Pixel-difference distances between two normalized images, averaged over
/// the number of samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormDistances {
    /// Mean absolute difference (L1 norm per sample).
    pub manhattan: f64,
    /// Fraction of samples that differ at all (zero norm per sample).
    pub zero_norm: f64,
}

/// Compare two normalized sample arrays of equal length.
pub fn compare(left: &[f64], right: &[f64]) -> Result<NormDistances, CompareError> {
    if left.len() != right.len() {
        return Err(CompareError::ShapeMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    if left.is_empty() {
        return Err(CompareError::Empty);
    }

    let (abs_sum, nonzero) = left
        .iter()
        .zip(right)
        .map(|(a, b)| a - b)
        .fold((0.0, 0usize), |(sum, count), diff| {
            (sum + diff.abs(), count + usize::from(diff != 0.0))
        });

    let n = left.len() as f64;
    Ok(NormDistances {
        manhattan: abs_sum / n,
        zero_norm: nonzero as f64 / n,
    })
}

/// Run both files through thumbnail, grayscale and normalize, then compare.
pub fn compare_files(
    first: &Path,
    second: &Path,
    config: &NormConfig,
) -> Result<NormDistances, CompareError> {
    let left = prepare(first, 1, config)?;
    let right = prepare(second, 2, config)?;
    compare(&left, &right)
}

/// Load one file and produce its normalized samples. `slot` numbers the
/// intermediate files written for this side of the pair.
fn prepare(path: &Path, slot: u8, config: &NormConfig) -> Result<Vec<f64>, CompareError> {
    let img = load_image(path)?;

    let thumb = match thumbnail(&img, config.thumbnail_size) {
        Ok(thumb) => thumb,
        Err(e) => {
            log::warn!("Cannot create thumbnail for {}: {}", path.display(), e);
            img
        }
    };

    let gray = to_grayscale(&thumb, config.grayscale);

    if let Some(dir) = &config.intermediates {
        save_intermediates(dir, slot, &thumb, &gray);
    }

    Ok(normalize(&samples(&gray)))
}

fn save_intermediates(dir: &Path, slot: u8, thumb: &DynamicImage, gray: &DynamicImage) {
    let thumb_path = dir.join(format!("img_{}.thumbnail", slot));
    if let Err(e) = save_jpeg(thumb, &thumb_path, INTERMEDIATE_JPEG_QUALITY) {
        log::warn!("Failed to write {}: {}", thumb_path.display(), e);
    }

    let gray_path = dir.join(format!("img_{}_grayscale.png", slot));
    if let Err(e) = gray.save_with_format(&gray_path, ImageFormat::Png) {
        log::warn!("Failed to write {}: {}", gray_path.display(), e);
    }
}
