//! Terminal output helpers.
//!
//! Status messages go to stderr with a coloured glyph; command results
//! (summaries, reports, graphs) go to stdout.

mod format;
mod messages;

pub use format::{format_size, print_analysis, print_bundles};
pub use messages::{error, info, success, warning};

/// Check if color output should be enabled.
///
/// `NO_COLOR` disables, `FORCE_COLOR` enables, otherwise stderr must be a terminal.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    console::user_attended_stderr()
}

/// Decide once whether coloured output is used.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    owo_colors::set_override(enabled);
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}
