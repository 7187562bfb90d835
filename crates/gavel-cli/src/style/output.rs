//! Output helper functions for consistent styled messages.

use super::colors::SemanticStyle;

/// Prints a success message with a checkmark.
pub fn print_success(msg: &str) {
    println!("{} {}", "✓".success(), msg);
}

/// Prints an error message with an X mark.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".error(), msg);
}

/// Prints a warning message with a warning symbol.
pub fn print_warn(msg: &str) {
    println!("{} {}", "⚠".warning(), msg);
}

/// Prints an informational line with an arrow.
pub fn print_info(msg: &str) {
    println!("{} {}", "→".info(), msg);
}

/// Prints a hint in muted text.
pub fn print_hint(msg: &str) {
    println!("{}", msg.muted());
}

/// Prints a labeled key-value pair with indentation.
pub fn print_labeled(key: &str, value: &str) {
    println!("  {}: {}", key.muted(), value);
}

/// Prints a bold section header.
pub fn print_header(title: &str) {
    println!("{}", title.header());
}
