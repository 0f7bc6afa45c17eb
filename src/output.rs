//! CLI output formatting.
//!
//! Output is information-first: the primary line names what was produced,
//! with the source and the applied operation as indented context lines.
//!
//! ```text
//! photo-200x150.jpg
//!     Source: photo.jpg
//!     Resize: 200x150
//! ```
//!
//! ```text
//! Presets (26)
//! 001 _1977
//! 002 aden
//! ...
//! Adjustments (5)
//! 001 contrast
//! ...
//! ```
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::filters::{FilterFamily, FilterRegistry, ResolvedFilter};
use crate::size::Size;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn family_title(family: FilterFamily) -> &'static str {
    match family {
        FilterFamily::Preset => "Presets",
        FilterFamily::Css => "Adjustments",
    }
}

fn written(output: &Path, source: &Path, label: &str, detail: &str) -> Vec<String> {
    vec![
        output.display().to_string(),
        format!("{}Source: {}", indent(1), source.display()),
        format!("{}{}: {}", indent(1), label, detail),
    ]
}

/// Format every registered filter, grouped by family.
pub fn format_filter_list(registry: &FilterRegistry) -> Vec<String> {
    let mut lines = Vec::new();
    for family in registry.families() {
        let names = registry.names_in(family);
        lines.push(format!("{} ({})", family_title(family), names.len()));
        for (i, name) in names.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), name));
        }
    }
    lines
}

pub fn print_filter_list(registry: &FilterRegistry) {
    for line in format_filter_list(registry) {
        println!("{}", line);
    }
}

/// Format the result of a successful resize.
pub fn format_resize_output(source: &Path, output: &Path, size: Size) -> Vec<String> {
    written(output, source, "Resize", &size.to_string())
}

pub fn print_resize_output(source: &Path, output: &Path, size: Size) {
    for line in format_resize_output(source, output, size) {
        println!("{}", line);
    }
}

/// Format the result of a successful filter.
pub fn format_filter_output(source: &Path, output: &Path, filter: &ResolvedFilter) -> Vec<String> {
    written(output, source, "Filter", &filter.qualified_name())
}

pub fn print_filter_output(source: &Path, output: &Path, filter: &ResolvedFilter) {
    for line in format_filter_output(source, output, filter) {
        println!("{}", line);
    }
}
