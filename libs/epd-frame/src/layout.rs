//! Geometry applied to a source image before it is dithered: centring onto
//! the white canvas and the quarter turn used for exact-size inputs.

use crate::common::{Canvas, Placement};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use log::debug;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Centre `image` on a white `canvas`, keeping its aspect ratio.
///
/// Alpha is dropped. The scaled size follows `placement`; the offset on each
/// axis is half the leftover space, rounded half to even.
#[must_use]
pub fn pad(image: &DynamicImage, canvas: Canvas, placement: Placement) -> RgbImage {
    let mut padded = RgbImage::from_pixel(canvas.width, canvas.height, WHITE);
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return padded;
    }

    let (fit_width, fit_height) = fitted_size(width, height, canvas, placement);
    let source = image.to_rgb8();
    let scaled = if (fit_width, fit_height) == (width, height) {
        source
    } else {
        debug!("Scaling {width}x{height} to {fit_width}x{fit_height}");
        imageops::resize(&source, fit_width, fit_height, FilterType::CatmullRom)
    };

    let x = centre_offset(canvas.width, fit_width);
    let y = centre_offset(canvas.height, fit_height);
    debug!("Placing {fit_width}x{fit_height} at ({x}, {y}) on {}x{}", canvas.width, canvas.height);
    imageops::replace(&mut padded, &scaled, x, y);
    padded
}

/// Rotate a quarter turn counter-clockwise; the result is `height x width`.
#[must_use]
pub fn rotate_quarter(image: &DynamicImage) -> DynamicImage {
    image.rotate270()
}

/// Size `width x height` takes on `canvas` under `placement`.
#[must_use]
pub fn fitted_size(width: u32, height: u32, canvas: Canvas, placement: Placement) -> (u32, u32) {
    match placement {
        Placement::NoUpscale if width <= canvas.width && height <= canvas.height => {
            (width, height)
        }
        Placement::NoUpscale | Placement::Contain => contain_size(width, height, canvas),
    }
}

fn contain_size(width: u32, height: u32, canvas: Canvas) -> (u32, u32) {
    // Compare width/height against canvas.width/canvas.height without floats.
    let source = u64::from(width) * u64::from(canvas.height);
    let target = u64::from(canvas.width) * u64::from(height);

    if source > target {
        let scaled = f64::from(height) / f64::from(width) * f64::from(canvas.width);
        (canvas.width, round_to_pixels(scaled))
    } else if source < target {
        let scaled = f64::from(width) / f64::from(height) * f64::from(canvas.height);
        (round_to_pixels(scaled), canvas.height)
    } else {
        (canvas.width, canvas.height)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_to_pixels(value: f64) -> u32 {
    (value.round_ties_even() as u32).max(1)
}

#[allow(clippy::cast_possible_truncation)]
fn centre_offset(outer: u32, inner: u32) -> i64 {
    let leftover = f64::from(outer.saturating_sub(inner));
    (leftover / 2.0).round_ties_even() as i64
}
