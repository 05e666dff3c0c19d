use std::io::Error as IoError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open image {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: IoError,
    },
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
}

pub type FrameResult<T> = Result<T, Error>;
