//! Deduplicated warnings with colored terminal output.
//!
//! The scanner and the default tree builder are silent by design; this module
//! is only reached from opt-in diagnostics such as the builder's issue
//! collection and strict mode.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a markup problem (prints once per unique message).
///
/// Returns `true` when the warning was printed, `false` when the same
/// component/message pair was already reported.
///
/// # Example
/// ```ignore
/// warn_once("Tree Builder", "close tag </b> does not match open element <a>");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[sprig {component}] warning: {message}").yellow());
    }
    should_print
}

/// Clear all recorded warnings (call before processing a new document).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
