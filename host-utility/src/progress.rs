// Progress indicators for encoding and upload steps

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::constants::ORANGE_256;
use crate::utils;

/// Create an orange-themed spinner with a message
///
/// The spinner auto-ticks every 80ms. Call `.finish_and_clear()` when done.
pub fn create_spinner(message: &str) -> ProgressBar {
    use std::time::Duration;

    let spinner = ProgressBar::new_spinner();
    let template = format!("  {{spinner:.{ORANGE_256}}} {{msg}}");
    let style = ProgressStyle::default_spinner()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Run a single step with spinner and success indicator
///
/// Shows `  ⠋ description` while executing `f`, then replaces it with
/// `  ✓ description` on success.
pub fn run_step<F, R>(description: &str, f: F) -> Result<R>
where
    F: FnOnce() -> Result<R>,
{
    let spinner = create_spinner(description);
    let result = f();
    spinner.finish_and_clear();
    if result.is_ok() {
        utils::success(description);
    }
    result
}

/// Like [`run_step`] but the closure returns `(R, detail)` where `detail` is
/// appended after the checkmark line: `  ✓ description — detail`
pub fn run_step_detail<F, R>(description: &str, f: F) -> Result<R>
where
    F: FnOnce() -> Result<(R, String)>,
{
    let spinner = create_spinner(description);
    let result = f();
    spinner.finish_and_clear();
    result.map(|(value, detail)| {
        utils::success(&format!("{description} — {detail}"));
        value
    })
}
