use core::convert::Infallible;
use embedded_graphics::{
    geometry::Dimensions,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Pixel, Point, PointsIter, Size},
    primitives::Rectangle,
};
use image::GrayImage;

/// `On` is white and `Off` is black, matching the raw 1-bit layout the panel
/// receives for its black plane.
pub trait AsFillByte {
    fn as_byte(&self) -> u8;
}

impl AsFillByte for BinaryColor {
    fn as_byte(&self) -> u8 {
        if self.is_on() { 0xFF } else { 0x00 }
    }
}

/// One packed 1-bit plane: row-major, MSB first, rows padded to a byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plane {
    width: u32,
    height: u32,
    buffer: Box<[u8]>,
}

impl Plane {
    /// A plane with every bit cleared (all black).
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize).div_ceil(8) * height as usize;
        Self {
            width,
            height,
            buffer: vec![BinaryColor::Off.as_byte(); len].into_boxed_slice(),
        }
    }

    /// Pack an already dithered image. Luma above 127 becomes a set (white) bit.
    #[must_use]
    pub fn from_bilevel(image: &GrayImage) -> Self {
        let mut plane = Self::new(image.width(), image.height());
        let pixels = image.enumerate_pixels().map(|(x, y, luma)| {
            let color = if luma.0[0] > 127 {
                BinaryColor::On
            } else {
                BinaryColor::Off
            };
            Pixel(Point::new(x.cast_signed(), y.cast_signed()), color)
        });
        plane.draw_iter(pixels).unwrap_or_else(|never| match never {});
        plane
    }

    #[must_use]
    pub fn row_pitch(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer.into_vec()
    }

    /// Flip every bit, padding bits included.
    pub fn invert(&mut self) {
        invert_plane(&mut self.buffer);
    }

    // Bits of the last byte in a row that map to real pixels.
    fn tail_mask(&self) -> u8 {
        match self.width % 8 {
            0 => 0xFF,
            used => !(0xFF >> used),
        }
    }
}

/// XOR every byte with `0xFF`. Applying it twice restores the input.
pub fn invert_plane(bytes: &mut [u8]) {
    for byte in bytes.iter_mut() {
        *byte ^= 0xFF;
    }
}

impl DrawTarget for Plane {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let row_pitch = self.row_pitch();

        for Pixel(coord, color) in pixels {
            let (x, y) = coord.into();

            if x < 0 || x >= self.width.cast_signed() || y < 0 || y >= self.height.cast_signed() {
                continue;
            }

            let index = y.cast_unsigned() as usize * row_pitch + x.cast_unsigned() as usize / 8;
            let bit = 7 - (x % 8);

            if color.is_on() {
                self.buffer[index] |= 1 << bit;
            } else {
                self.buffer[index] &= !(1 << bit);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped_area = area.intersection(&self.bounding_box());

        if clipped_area.is_zero_sized() {
            return Ok(());
        }

        self.draw_iter(clipped_area.points().map(|p| Pixel(p, color)))
    }

    fn clear(&mut self, color: BinaryColor) -> Result<(), Self::Error> {
        let row_pitch = self.row_pitch();
        if row_pitch == 0 {
            return Ok(());
        }
        let tail = self.tail_mask();
        for row in self.buffer.chunks_exact_mut(row_pitch) {
            row.fill(color.as_byte());
            if let Some(last) = row.last_mut() {
                *last &= tail;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for Plane {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
