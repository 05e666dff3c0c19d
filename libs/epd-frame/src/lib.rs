//! Encode images into the raw 1-bit frames accepted by an 800x480 e-paper
//! panel.
//!
//! A frame is one packed plane (`encode_single`) or a black plane followed by
//! an inverted accent plane (`encode_dual`). Planes are row-major, MSB first,
//! with `1` meaning white.

pub mod common;
mod error;
pub mod frame;
pub mod layout;
pub mod plane;
mod source;

pub use common::{BUFFER_SIZE, Canvas, HEIGHT, Placement, WIDTH};
pub use error::{Error, FrameResult};
pub use frame::{
    SingleOptions, blank_frame, dither_bilevel, encode_dual, encode_single, render_padded,
    render_single,
};
pub use plane::{Plane, invert_plane};
pub use source::load_image;
