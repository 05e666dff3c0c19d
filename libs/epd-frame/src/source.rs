use crate::error::{Error, FrameResult};
use image::{DynamicImage, ImageReader};
use log::debug;
use std::path::Path;

/// Open and decode an image, guessing the format from its content.
///
/// The file is closed before this returns.
pub fn load_image(path: &Path) -> FrameResult<DynamicImage> {
    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let image = reader.decode()?;
    debug!(
        "Loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}
