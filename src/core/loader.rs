use image::{DynamicImage, ImageReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Decode the image at `path` into an owned bitmap.
///
/// The format is sniffed from the file contents, not the extension. The reader
/// and its file handle are consumed by `decode` and closed before this returns.
pub fn load_image(path: &Path) -> Result<DynamicImage, LoadError> {
    let open_err = |source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .map_err(open_err)?
        .with_guessed_format()
        .map_err(open_err)?;

    reader.decode().map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
