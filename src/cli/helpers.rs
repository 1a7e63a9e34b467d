//! Shared helper functions for CLI commands

use clap::ValueEnum;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

/// Truncate a string to `max_len` characters, adding "..." if truncated
///
/// Counts characters rather than bytes, so Cyrillic text is cut safely.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Pick the output format: the flag, then the configured default, then `fallback`
pub fn resolve_format(global: &GlobalOpts, config: &Config, fallback: OutputFormat) -> OutputFormat {
    if global.format != OutputFormat::Auto {
        return global.format;
    }

    config
        .default_format
        .as_deref()
        .and_then(|s| OutputFormat::from_str(s, true).ok())
        .filter(|f| *f != OutputFormat::Auto)
        .unwrap_or(fallback)
}
