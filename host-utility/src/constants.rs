// Constants for the epd-push host utility
//
// Defaults used when neither the config file nor the command line say
// otherwise.

// ============================================================================
// Device
// ============================================================================

/// Base URL of the display's HTTP server
pub const DEFAULT_DEVICE_URL: &str = "http://192.168.1.139/";

/// Path on the device that accepts a raw frame as the POST body
pub const DISPLAY_PATH: &str = "display";

/// HTTP timeout for status queries and uploads
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Input Files
// ============================================================================

/// Image used for single frames and for the black plane of dual frames
pub const DEFAULT_BLACK_IMAGE: &str = "image.png";

/// Image used for the accent plane of dual frames
pub const DEFAULT_ACCENT_IMAGE: &str = "imagen.jpg";

// ============================================================================
// Progress Bar Theming
// ============================================================================

/// Orange theme color - single source of truth for RGB values
/// Uses (255, 175, 0) to exactly match xterm-256 color 214 for consistency
pub const ORANGE: (u8, u8, u8) = (255, 175, 0);

/// Calculate nearest xterm-256 color index from RGB
///
/// The xterm-256 palette (colors 16-231) is a 6×6×6 RGB cube where each
/// component maps to values: 0, 95, 135, 175, 215, 255.
/// Formula: 16 + (36 × `r_idx`) + (6 × `g_idx`) + `b_idx`
const fn rgb_to_xterm256(r: u8, g: u8, b: u8) -> u8 {
    const fn nearest_idx(val: u8) -> u8 {
        if val < 48 {
            0
        } else if val < 115 {
            1
        } else if val < 155 {
            2
        } else if val < 195 {
            3
        } else if val < 235 {
            4
        } else {
            5
        }
    }
    16 + 36 * nearest_idx(r) + 6 * nearest_idx(g) + nearest_idx(b)
}

/// Orange theme color (xterm-256 color code for indicatif) - derived from ORANGE
pub const ORANGE_256: u8 = rgb_to_xterm256(ORANGE.0, ORANGE.1, ORANGE.2);
