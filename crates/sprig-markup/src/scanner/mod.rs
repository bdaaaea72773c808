//! Markup scanner.
//!
//! A character-at-a-time state machine that turns the whole input into a
//! flat, ordered token sequence in one pass. Malformed input is tolerated:
//! unexpected characters are skipped and unterminated constructs at the end
//! of the input are dropped, never reported.

/// Scanner state machine implementation.
pub mod core;
/// Input cursor with pushback and lookahead.
pub mod cursor;
mod helpers;
/// Token types produced by the scanner.
pub mod token;

pub use self::core::{Scanner, ScannerState};
pub use cursor::Cursor;
pub use token::{Token, TokenKind};

/// Scan `input` into its token sequence.
///
/// Every call runs on a fresh [`Scanner`], so calls never share state.
#[must_use]
pub fn scan(input: &str) -> Vec<Token> {
    let mut scanner = Scanner::new(input);
    scanner.run();
    scanner.into_tokens()
}
