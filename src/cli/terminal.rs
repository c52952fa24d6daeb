//! Terminal capability detection and utilities

use owo_colors::{OwoColorize, colors::css};

/// Detects whether colored output should be enabled on stderr
pub fn stderr_supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stderr).is_some()
}

/// Detects terminal width, returning None if not available
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Check if terminal is narrow (< 40 columns)
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|w| w < 40)
}

/// Extension trait for colorizing diagnostics
pub trait Colorize {
    /// Color as an error (red, bold)
    fn error(&self) -> String;
}

impl Colorize for str {
    fn error(&self) -> String {
        if stderr_supports_color() {
            self.fg::<css::Red>().bold().to_string()
        } else {
            self.to_string()
        }
    }
}

impl Colorize for String {
    fn error(&self) -> String {
        self.as_str().error()
    }
}
