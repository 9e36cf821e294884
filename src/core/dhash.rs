use image::DynamicImage;
use image_hasher::{FilterType, HashAlg, Hasher, HasherConfig, ImageHash};
use std::fmt;
use std::path::Path;

use crate::core::loader::{LoadError, load_image};

/// Difference-hash fingerprint of one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DHash(ImageHash);

impl DHash {
    /// Number of bits that differ between the two hashes.
    pub fn distance(&self, other: &DHash) -> u32 {
        self.0.dist(&other.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for DHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Computes row-gradient hashes: the image is reduced to a grayscale grid one
/// column wider than the hash, and each bit records whether brightness rises
/// between horizontal neighbours.
pub struct DHasher {
    hasher: Hasher,
}

impl DHasher {
    pub fn new(hash_size: u32) -> Self {
        let hasher = HasherConfig::new()
            .hash_alg(HashAlg::Gradient)
            .hash_size(hash_size, hash_size)
            .resize_filter(FilterType::Lanczos3)
            .to_hasher();
        Self { hasher }
    }

    pub fn hash_image(&self, img: &DynamicImage) -> DHash {
        DHash(self.hasher.hash_image(img))
    }

    pub fn hash_file(&self, path: &Path) -> Result<DHash, LoadError> {
        let img = load_image(path)?;
        Ok(self.hash_image(&img))
    }
}

impl Default for DHasher {
    fn default() -> Self {
        Self::new(8)
    }
}
