use crate::common::{Canvas, Placement};
use crate::layout::{pad, rotate_quarter};
use crate::plane::Plane;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::DrawTarget};
use image::imageops::{BiLevel, ColorMap, dither};
use image::{DynamicImage, GenericImageView, GrayImage, Luma, Rgb};
use log::debug;

/// Options for the single-plane path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SingleOptions {
    pub placement: Placement,
    /// Flip the packed plane so that set bits mean black. Off by default.
    pub invert: bool,
}

/// ITU-R 601-2 grey level: `L = R * 299/1000 + G * 587/1000 + B * 114/1000`.
fn luma_601(Rgb([r, g, b]): Rgb<u8>) -> u8 {
    let weighted = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    u8::try_from(weighted / 1000).unwrap_or(u8::MAX)
}

/// Reduce to strict black and white with Floyd-Steinberg error diffusion.
///
/// Images narrower than two pixels have no neighbour to diffuse into and are
/// thresholded instead.
#[must_use]
pub fn dither_bilevel(image: DynamicImage) -> GrayImage {
    let rgb = image.into_rgb8();
    let (width, height) = rgb.dimensions();
    let mut luma = GrayImage::from_fn(width, height, |x, y| {
        Luma([luma_601(*rgb.get_pixel(x, y))])
    });

    if width < 2 || height == 0 {
        debug!("{width}x{height} is too narrow to diffuse, thresholding");
        for pixel in luma.pixels_mut() {
            BiLevel.map_color(pixel);
        }
    } else {
        dither(&mut luma, &BiLevel);
    }
    luma
}

/// The dithered image `encode_single` packs.
///
/// An input exactly the canvas size is turned a quarter counter-clockwise
/// and not padded; anything else is padded onto the canvas.
#[must_use]
pub fn render_single(image: &DynamicImage, canvas: Canvas, placement: Placement) -> GrayImage {
    let (width, height) = image.dimensions();
    let prepared = if canvas.matches(width, height) {
        debug!("Source is exactly {width}x{height}, rotating");
        rotate_quarter(image)
    } else {
        DynamicImage::ImageRgb8(pad(image, canvas, placement))
    };
    dither_bilevel(prepared)
}

/// The dithered image one plane of `encode_dual` packs.
#[must_use]
pub fn render_padded(image: &DynamicImage, canvas: Canvas, placement: Placement) -> GrayImage {
    dither_bilevel(DynamicImage::ImageRgb8(pad(image, canvas, placement)))
}

/// Encode one image into a single packed plane.
#[must_use]
pub fn encode_single(image: &DynamicImage, canvas: Canvas, options: SingleOptions) -> Vec<u8> {
    let mut plane = Plane::from_bilevel(&render_single(image, canvas, options.placement));
    if options.invert {
        debug!("Inverting single plane");
        plane.invert();
    }
    let bytes = plane.into_bytes();
    debug!("Encoded single frame: {} bytes", bytes.len());
    bytes
}

/// Encode a black plane followed by an inverted accent plane.
///
/// Both sources are padded independently; neither is rotated.
#[must_use]
pub fn encode_dual(
    black: &DynamicImage,
    accent: &DynamicImage,
    canvas: Canvas,
    placement: Placement,
) -> Vec<u8> {
    let black_plane = Plane::from_bilevel(&render_padded(black, canvas, placement));
    let mut accent_plane = Plane::from_bilevel(&render_padded(accent, canvas, placement));
    accent_plane.invert();

    let mut bytes = black_plane.into_bytes();
    bytes.extend_from_slice(accent_plane.as_bytes());
    debug!("Encoded dual frame: {} bytes", bytes.len());
    bytes
}

/// Dual frame that blanks the panel: white black plane, empty accent plane.
#[must_use]
pub fn blank_frame(canvas: Canvas) -> Vec<u8> {
    let mut black_plane = Plane::new(canvas.width, canvas.height);
    let mut accent_plane = Plane::new(canvas.width, canvas.height);
    black_plane
        .clear(BinaryColor::On)
        .unwrap_or_else(|never| match never {});
    accent_plane
        .clear(BinaryColor::On)
        .unwrap_or_else(|never| match never {});
    accent_plane.invert();

    let mut bytes = black_plane.into_bytes();
    bytes.extend_from_slice(accent_plane.as_bytes());
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage, Rgba, RgbaImage};

    fn solid(width: u32, height: u32, luma: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([luma])))
    }

    #[test]
    fn test_solid_white_exact_size_is_all_ones() {
        let bytes = encode_single(&solid(800, 480, 255), Canvas::DEFAULT, SingleOptions::default());
        assert_eq!(bytes.len(), 48_000);
        assert!(bytes.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_exact_size_is_rotated_before_packing() {
        let canvas = Canvas::new(16, 8).unwrap();
        let mut image = GrayImage::from_pixel(16, 8, Luma([255]));
        for x in 0..16 {
            image.put_pixel(x, 0, Luma([0]));
        }

        // top row ends up as the left column of an 8x16 image
        let bytes = encode_single(
            &DynamicImage::ImageLuma8(image),
            canvas,
            SingleOptions::default(),
        );
        assert_eq!(bytes, vec![0x7F; 16]);
    }

    #[test]
    fn test_exact_default_size_left_column_becomes_last_row() {
        let mut image = GrayImage::from_pixel(800, 480, Luma([255]));
        for y in 0..480 {
            image.put_pixel(0, y, Luma([0]));
        }

        let bytes = encode_single(
            &DynamicImage::ImageLuma8(image),
            Canvas::DEFAULT,
            SingleOptions::default(),
        );
        assert_eq!(bytes.len(), 48_000);
        // 480 px wide rows of 60 bytes, 800 rows
        let (body, last_row) = bytes.split_at(48_000 - 60);
        assert!(body.iter().all(|&b| b == 0xFF));
        assert!(last_row.iter().all(|&b| b == 0x00));
    }

    #[test]
    fn test_other_sizes_are_padded_not_rotated() {
        let rendered = render_single(&solid(400, 240, 0), Canvas::DEFAULT, Placement::NoUpscale);
        assert_eq!(rendered.dimensions(), (800, 480));
        assert_eq!(rendered.get_pixel(199, 240), &Luma([255]));
        assert_eq!(rendered.get_pixel(200, 240), &Luma([0]));
    }

    #[test]
    fn test_single_invert_is_opt_in() {
        let canvas = Canvas::new(8, 4).unwrap();
        let image = solid(4, 4, 255);

        let plain = encode_single(&image, canvas, SingleOptions::default());
        assert!(plain.iter().all(|&b| b == 0xFF));

        let inverted = encode_single(
            &image,
            canvas,
            SingleOptions {
                invert: true,
                ..SingleOptions::default()
            },
        );
        assert!(inverted.iter().all(|&b| b == 0x00));
    }

    #[test]
    fn test_dual_black_plane_first_accent_inverted() {
        let canvas = Canvas::DEFAULT;
        let bytes = encode_dual(
            &solid(100, 100, 255),
            &solid(100, 100, 0),
            canvas,
            Placement::Contain,
        );
        assert_eq!(bytes.len(), 96_000);

        let (black, accent) = bytes.split_at(48_000);
        assert!(black.iter().all(|&b| b == 0xFF));
        // 100x100 black scaled to 480x480 in the middle of the accent plane
        assert_eq!(accent[0], 0x00);
        assert_eq!(accent[240 * 100 + 50], 0xFF);
    }

    #[test]
    fn test_dual_does_not_rotate_exact_size() {
        let canvas = Canvas::new(16, 8).unwrap();
        let mut image = GrayImage::from_pixel(16, 8, Luma([255]));
        image.put_pixel(0, 0, Luma([0]));

        let bytes = encode_dual(
            &DynamicImage::ImageLuma8(image),
            &solid(16, 8, 255),
            canvas,
            Placement::Contain,
        );
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes[0], 0x7F);
        assert!(bytes[1..16].iter().all(|&b| b == 0xFF));
        assert!(bytes[16..].iter().all(|&b| b == 0x00));
    }

    #[test]
    fn test_blank_frame_matches_dual_of_white_images() {
        for canvas in [Canvas::new(10, 3).unwrap(), Canvas::new(24, 8).unwrap()] {
            let white = solid(canvas.width, canvas.height, 255);
            assert_eq!(
                blank_frame(canvas),
                encode_dual(&white, &white, canvas, Placement::Contain)
            );
        }
    }

    #[test]
    fn test_blank_frame_default_canvas() {
        let bytes = blank_frame(Canvas::DEFAULT);
        assert_eq!(bytes.len(), 96_000);
        assert!(bytes[..48_000].iter().all(|&b| b == 0xFF));
        assert!(bytes[48_000..].iter().all(|&b| b == 0x00));
    }

    #[test]
    fn test_alpha_is_ignored() {
        let canvas = Canvas::new(8, 1).unwrap();
        let transparent_black = RgbaImage::from_pixel(4, 1, Rgba([0, 0, 0, 0]));
        let opaque_black = RgbImage::from_pixel(4, 1, Rgb([0, 0, 0]));

        assert_eq!(
            encode_single(
                &DynamicImage::ImageRgba8(transparent_black),
                canvas,
                SingleOptions::default()
            ),
            encode_single(
                &DynamicImage::ImageRgb8(opaque_black),
                canvas,
                SingleOptions::default()
            ),
        );
    }

    #[test]
    fn test_grey_level_weights() {
        assert_eq!(luma_601(Rgb([0, 180, 0])), 105);
        assert_eq!(luma_601(Rgb([255, 0, 0])), 76);
        assert_eq!(luma_601(Rgb([255, 255, 255])), 255);
        assert_eq!(luma_601(Rgb([0, 0, 0])), 0);
    }

    #[test]
    fn test_saturated_green_dithers_to_black() {
        let green = RgbImage::from_pixel(2, 2, Rgb([0, 180, 0]));
        let dithered = dither_bilevel(DynamicImage::ImageRgb8(green));
        assert_eq!(dithered.get_pixel(0, 0), &Luma([0]));
    }

    #[test]
    fn test_one_pixel_wide_canvas() {
        let canvas = Canvas::new(1, 9).unwrap();

        // exact size rotates into a 9x1 image: one row of two bytes
        let single = encode_single(&solid(1, 9, 0), canvas, SingleOptions::default());
        assert_eq!(single, vec![0x00, 0x00]);

        let single = encode_single(&solid(3, 5, 255), canvas, SingleOptions::default());
        assert_eq!(single, vec![0x80; 9]);

        let white = solid(3, 5, 255);
        let dual = encode_dual(&white, &white, canvas, Placement::Contain);
        assert_eq!(dual.len(), 18);
        assert_eq!(dual, blank_frame(canvas));
    }

    #[test]
    fn test_one_pixel_tall_canvas() {
        let canvas = Canvas::new(9, 1).unwrap();

        // exact size rotates into a 1x9 image: nine rows of one byte
        let single = encode_single(&solid(9, 1, 0), canvas, SingleOptions::default());
        assert_eq!(single, vec![0x00; 9]);

        let single = encode_single(&solid(4, 4, 255), canvas, SingleOptions::default());
        assert_eq!(single, vec![0xFF, 0x80]);

        // black source shrinks to one dot centred at x = 4
        let dual = encode_dual(&solid(2, 2, 0), &solid(2, 2, 255), canvas, Placement::Contain);
        assert_eq!(dual, vec![0xF7, 0x80, 0x00, 0x7F]);
    }

    #[test]
    fn test_single_pixel_canvas() {
        let canvas = Canvas::new(1, 1).unwrap();
        assert_eq!(encode_single(&solid(1, 1, 255), canvas, SingleOptions::default()), vec![0x80]);
        assert_eq!(encode_single(&solid(1, 2, 0), canvas, SingleOptions::default()), vec![0x00]);
        assert_eq!(blank_frame(canvas), vec![0x80, 0x7F]);
    }

    #[test]
    fn test_dither_output_is_strictly_bilevel() {
        let gradient = GrayImage::from_fn(64, 8, |x, _| Luma([u8::try_from(x * 4).unwrap()]));
        let dithered = dither_bilevel(DynamicImage::ImageLuma8(gradient));
        assert!(dithered.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }
}
