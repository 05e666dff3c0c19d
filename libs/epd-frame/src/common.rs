use crate::error::{Error, FrameResult};

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 480;
pub const BUFFER_SIZE: usize = (WIDTH as usize).div_ceil(8) * HEIGHT as usize;

/// Pixel dimensions of the panel a frame is encoded for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub const DEFAULT: Self = Self {
        width: WIDTH,
        height: HEIGHT,
    };

    pub fn new(width: u32, height: u32) -> FrameResult<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidCanvas { width, height });
        }
        Ok(Self { width, height })
    }

    /// Bytes per packed row, including the padding bits of the last byte.
    #[must_use]
    pub const fn row_pitch(self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Byte length of one packed plane for this canvas.
    #[must_use]
    pub const fn plane_len(self) -> usize {
        self.row_pitch() * self.height as usize
    }

    #[must_use]
    pub const fn matches(self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How a source image is fitted onto the canvas before packing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    /// Scale up or down to the largest size that fits, keeping aspect ratio.
    #[default]
    Contain,
    /// Keep native size when it fits; only scale down oversized sources.
    NoUpscale,
}
