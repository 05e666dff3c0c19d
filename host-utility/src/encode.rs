// Loading images from disk and turning them into device frames

use anyhow::{Context, Result};
use epd_frame::{Canvas, Placement, SingleOptions};
use image::ImageFormat;
use std::path::Path;

use crate::progress::run_step_detail;
use crate::utils::{self, format_with_separators};

/// What to put in a frame
#[derive(Debug, Clone, Copy)]
pub struct FrameSpec<'a> {
    /// Single image, or black plane of a dual frame
    pub black: &'a Path,
    /// Accent plane; `None` means a single-plane frame
    pub accent: Option<&'a Path>,
    pub placement: Placement,
    /// Only honoured for single-plane frames
    pub invert: bool,
}

fn load(path: &Path) -> Result<image::DynamicImage> {
    epd_frame::load_image(path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Load the images named by `spec` and encode them for `canvas`
pub fn build_frame(spec: &FrameSpec<'_>, canvas: Canvas) -> Result<Vec<u8>> {
    let label = match spec.accent {
        None => format!("Encoding {}", spec.black.display()),
        Some(accent) => format!(
            "Encoding {} + {}",
            spec.black.display(),
            accent.display()
        ),
    };

    run_step_detail(&label, || {
        let black = load(spec.black)?;
        let frame = match spec.accent {
            None => epd_frame::encode_single(
                &black,
                canvas,
                SingleOptions {
                    placement: spec.placement,
                    invert: spec.invert,
                },
            ),
            Some(accent) => {
                if spec.invert {
                    log::warn!("--invert only applies to single-plane frames, ignoring");
                }
                epd_frame::encode_dual(&black, &load(accent)?, canvas, spec.placement)
            }
        };
        let detail = format!("{} bytes", format_with_separators(frame.len()));
        Ok((frame, detail))
    })
}

/// Save the dithered image the black (or only) plane is packed from
pub fn save_preview(spec: &FrameSpec<'_>, canvas: Canvas, output: &Path) -> Result<()> {
    let black = load(spec.black)?;
    let preview = match spec.accent {
        None => epd_frame::render_single(&black, canvas, spec.placement),
        Some(_) => epd_frame::render_padded(&black, canvas, spec.placement),
    };
    preview
        .save_with_format(output, ImageFormat::Png)
        .with_context(|| format!("Failed to write preview: {}", output.display()))
}

/// `epd-push encode`: write the raw frame to a file instead of uploading it
pub fn cmd_encode(
    spec: &FrameSpec<'_>,
    canvas: Canvas,
    output: &Path,
    preview: Option<&Path>,
) -> Result<()> {
    let frame = build_frame(spec, canvas)?;

    std::fs::write(output, &frame)
        .with_context(|| format!("Failed to write frame: {}", output.display()))?;
    utils::success(&format!("Wrote {}", output.display()));

    if let Some(preview) = preview {
        save_preview(spec, canvas, preview)?;
        utils::success(&format!("Wrote preview {}", preview.display()));
    }

    Ok(())
}
