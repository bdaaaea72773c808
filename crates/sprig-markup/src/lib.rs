//! Permissive markup scanner and single-pass tree builder.
//!
//! # Scope
//!
//! This crate implements:
//! - **Scanner**: a character-at-a-time state machine that turns markup text
//!   into a flat token stream
//!   - Tags, attributes (quoted, single-quoted, unquoted, presence-only)
//!   - Comments, CDATA sections, doctype declarations
//!   - `&name;` references, captured by name and never decoded
//!
//! - **Tree Builder**: folds the token stream into a [`MarkupTree`]
//!   - One cursor and parent links, no stack of open elements
//!   - Attribute values collected as text and entity parts
//!   - Opt-in strict mode that reports close tag mismatches
//!
//! - **Recovery** (opt-in): [`Scanner::with_tag_end_recovery`],
//!   [`Scanner::with_trailing_text`] and
//!   [`TreeBuilder::with_attribute_list_recovery`]
//!
//! Malformed input is never an error: the scanner skips what it cannot use
//! and drops constructs that are still open at end of input.
//!
//! # Not Implemented
//!
//! - Entity decoding
//! - Raw text handling for `<script>` and `<style>`
//! - Serializing a tree back to markup

/// Token stream to tree.
pub mod builder;
/// Text to token stream.
pub mod scanner;

pub use builder::{BuildError, ParseIssue, TreeBuilder, build, dump_tree, print_tree};
pub use scanner::{Scanner, ScannerState, Token, TokenKind, scan};
pub use sprig_dom::MarkupTree;

/// Scan and build in one call.
#[must_use]
pub fn parse(input: &str) -> MarkupTree {
    build(&scan(input))
}
