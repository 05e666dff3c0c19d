use anyhow::{Context, Result};
use colored::Colorize;
use std::time::Duration;

/// Display a success message
pub fn success(message: &str) {
    if message.is_empty() {
        println!("  {}", "✓".green());
    } else {
        println!("  {} {}", "✓".green(), message);
    }
}

/// Display a warning message
pub fn warning(message: &str) {
    println!("  {} {}", "⚠".bold().yellow(), message);
}

/// Display an info message
pub fn info(message: &str) {
    println!("  • {message}");
}

/// Prompt the user for a yes/no confirmation
///
/// Returns true if the user confirms (y/yes), false otherwise.
/// If `auto_confirm` is true, automatically returns true without prompting.
pub fn prompt_yes_no(message: &str, auto_confirm: bool) -> Result<bool> {
    use std::io::Write;

    if auto_confirm {
        return Ok(true);
    }

    print!("{message} [y/N]: ");
    std::io::stdout().flush()?;

    let mut response = String::new();
    std::io::stdin()
        .read_line(&mut response)
        .context("Failed to read user input")?;

    let response = response.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

// =============================================================================
// HTTP Utilities
// =============================================================================

/// Create a ureq HTTP agent with the specified timeout
///
/// Non-2xx responses are returned as normal responses rather than errors; the
/// display answers with plain text either way.
pub fn create_http_agent(timeout_secs: u64) -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(timeout_secs)))
        .http_status_as_error(false)
        .build();
    config.into()
}

// =============================================================================
// Number Formatting Utilities
// =============================================================================

/// Format a number with thousands separators
///
/// Example: 1234567 -> "1,234,567"
pub fn format_with_separators(num: usize) -> String {
    let s = num.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_separators() {
        assert_eq!(format_with_separators(0), "0");
        assert_eq!(format_with_separators(100), "100");
        assert_eq!(format_with_separators(48_000), "48,000");
        assert_eq!(format_with_separators(1_234_567), "1,234,567");
    }

    #[test]
    fn test_prompt_auto_confirm_skips_stdin() {
        assert!(prompt_yes_no("Continue?", true).unwrap());
    }
}
