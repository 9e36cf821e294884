use std::path::PathBuf;

use crate::core::compare::NormDistances;

/// Settings shared by both passes.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub scan: ScanConfig,
    pub norm: NormConfig,
    pub hash: HashConfig,
}

/// Which files the directory walker picks up.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Extension without the leading dot. Matched case-sensitively.
    pub extension: String,
    /// Sort the listing by path instead of keeping filesystem order.
    pub sorted: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: "JPG".to_string(),
            sorted: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrayscaleMethod {
    /// Luminance plus alpha, two samples per pixel.
    LumaAlpha,
    /// Mean of the colour channels, one sample per pixel.
    ChannelAverage,
}

/// Pixel-norm comparison settings.
#[derive(Debug, Clone)]
pub struct NormConfig {
    /// Bounding box every image is shrunk into before comparing.
    pub thumbnail_size: (u32, u32),
    pub grayscale: GrayscaleMethod,
    /// A pair is similar when its Manhattan distance per sample is below this.
    pub threshold: f64,
    /// Distances reported when a pair cannot be compared.
    pub failure_distances: NormDistances,
    /// Directory that receives the per-pair thumbnails and grayscale images.
    pub intermediates: Option<PathBuf>,
}

impl Default for NormConfig {
    fn default() -> Self {
        Self {
            thumbnail_size: (128, 128),
            grayscale: GrayscaleMethod::LumaAlpha,
            threshold: 10.0,
            failure_distances: NormDistances {
                manhattan: 100.0,
                zero_norm: 100.0,
            },
            intermediates: None,
        }
    }
}

/// Difference-hash comparison settings.
#[derive(Debug, Clone)]
pub struct HashConfig {
    /// Side of the gradient grid; the hash has `hash_size * hash_size` bits.
    pub hash_size: u32,
    /// A pair is similar when its Hamming distance is below this.
    pub threshold: u32,
    /// Only the first `limit` files of the sorted listing are hashed.
    pub limit: usize,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            hash_size: 8,
            threshold: 20,
            limit: 100,
        }
    }
}
