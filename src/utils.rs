//! Colored message prefixes and small path helpers.

use owo_colors::OwoColorize;
use std::path::Path;

/// Colors are on unless the output is JSON or `NO_COLOR` is set.
pub fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn prefix(label: &str, output: &str, paint: fn(&str) -> String) -> String {
    if use_colors(output) {
        paint(label)
    } else {
        label.to_string()
    }
}

pub fn error_prefix(output: &str) -> String {
    prefix("error:", output, |s| s.red().bold().to_string())
}

pub fn note_prefix(output: &str) -> String {
    prefix("note:", output, |s| s.cyan().bold().to_string())
}

pub fn info_prefix(output: &str) -> String {
    prefix("info:", output, |s| s.blue().bold().to_string())
}

/// Display form used in messages and reports.
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_are_plain_for_json_output() {
        assert_eq!(error_prefix("json"), "error:");
        assert_eq!(note_prefix("json"), "note:");
        assert_eq!(info_prefix("json"), "info:");
    }
}
