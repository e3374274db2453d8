use colored::Colorize;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Diagnostic line, only shown with `--verbose`. Goes to stderr so listings
/// on stdout stay clean for piping.
pub fn log(message: impl Display) {
    if is_verbose() {
        eprintln!("{} {}", "[VERBOSE]".blue(), message);
    }
}

/// Always shown.
pub fn warn(message: impl Display) {
    eprintln!("{} {}", "[WARN]".yellow(), message);
}
