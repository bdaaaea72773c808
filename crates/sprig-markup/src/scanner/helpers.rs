//! Helper methods for the scanner.
//!
//! This module contains utility functions used throughout the state machine:
//! - State transitions ("switch to", "reconsume in")
//! - Section handling (deferred runs of characters)
//! - Token emission
//! - Character classification

use super::core::{Scanner, ScannerState};
use super::token::Token;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl Scanner<'_> {
    /// Transitions to a new state. The next character will be consumed on the
    /// next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: ScannerState) {
        self.state = new_state;
    }

    /// Transitions to a new state without consuming the current character.
    /// The same character will be processed again in the new state.
    pub(super) fn reconsume_in(&mut self, new_state: ScannerState) {
        self.cursor.push_back();
        self.state = new_state;
    }

    /// Remember where the `&` is and collect an entity name, resuming in
    /// `return_state` afterwards.
    pub(super) const fn begin_character_reference(&mut self, return_state: ScannerState) {
        self.return_state = return_state;
        self.reference_start = self.cursor.position();
        self.state = ScannerState::CharacterReference;
    }
}

// =============================================================================
// Section Helpers
// =============================================================================

impl Scanner<'_> {
    /// Start the pending run at the current character, unless one is
    /// already open.
    pub(super) const fn mark_section_start(&mut self) {
        if self.section_start.is_none() {
            self.section_start = Some(self.cursor.position());
        }
    }

    /// Close the pending run and return its text, from its start up to (not
    /// including) the current character. `None` if no run was open.
    pub(super) fn take_section(&mut self) -> Option<String> {
        self.section_start
            .take()
            .map(|start| self.cursor.slice_from(start).to_string())
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl Scanner<'_> {
    /// Adds a token to the output stream.
    pub(super) fn emit(&mut self, token: Token) {
        self.token_stream.push(token);
    }

    /// Flush the pending run as a text token. Whitespace-only runs are
    /// dropped.
    pub(super) fn emit_text(&mut self) {
        if let Some(text) = self.take_section()
            && !Self::is_blank(&text)
        {
            self.emit(Token::Text { text });
        }
    }

    pub(super) fn emit_open_tag_start(&mut self) {
        let tag = self.take_section().unwrap_or_default();
        self.emit(Token::OpenTagStart { tag });
    }

    /// A name made only of skipped characters (`<a ">`) is not emitted.
    pub(super) fn emit_attribute_name(&mut self) {
        if let Some(name) = self.take_section() {
            self.emit(Token::AttributeName { name });
        }
    }
}

// =============================================================================
// Character Classification
// =============================================================================

impl Scanner<'_> {
    /// ASCII `A`-`Z` and `a`-`z`, both ends included.
    pub(super) const fn is_letter(c: char) -> bool {
        c.is_ascii_alphabetic()
    }

    /// Space, line feed, tab, form feed and carriage return.
    pub(crate) const fn is_whitespace(c: char) -> bool {
        matches!(c, ' ' | '\n' | '\t' | '\x0C' | '\r')
    }

    /// True for empty and whitespace-only text.
    pub(crate) fn is_blank(text: &str) -> bool {
        text.chars().all(Self::is_whitespace)
    }
}
