//! # Logging Module
//!
//! Output helpers for ducopyright:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - `tracing` subscriber setup for library diagnostics
//!
//! Verbose logs go to stderr and info logs go to stdout, so the summary stays
//! easy to pipe.
//!
//! ## Example
//!
//! ```rust
//! use ducopyright::logging::{ColorMode, set_verbose};
//! use ducopyright::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Auto.apply();
//!
//! verbose_log!("Rewriting file: {}", "example.py");
//! info_log!("Header added to: {}", "example.py");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, level_for, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Uses the same format string syntax as [`eprintln!`].
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info message, highlighted when stdout supports colours.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
