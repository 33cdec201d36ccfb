// Rust guideline compliant 2026-02-06

//! Terminal helpers: color detection and status lines on stderr.

use std::env;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Determines if colored output should be used.
///
/// Respects the NO_COLOR environment variable and terminal capabilities.
pub fn should_use_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    atty::is(atty::Stream::Stderr)
}

/// Returns true if stdin is a terminal a prompt can read from.
pub fn stdin_is_interactive() -> bool {
    atty::is(atty::Stream::Stdin)
}

fn print_status(prefix: &str, prefix_color: Color, message: &str) {
    let choice = if should_use_color() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(prefix_color)).set_bold(true));
    let _ = write!(stderr, "{} ", prefix);
    let _ = stderr.reset();
    let _ = writeln!(stderr, "{}", message);
}

/// Prints a success line.
pub fn print_success(message: &str) {
    print_status("✓", Color::Green, message);
}

/// Prints a warning line.
pub fn print_warning(message: &str) {
    print_status("⚠", Color::Yellow, message);
}

/// Prints an error line.
pub fn print_error(message: &str) {
    print_status("✗", Color::Red, message);
}
