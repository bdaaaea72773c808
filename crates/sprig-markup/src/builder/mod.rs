//! Tree builder.
//!
//! Folds the scanner's token stream into a [`MarkupTree`] in one pass. Text
//! and entity tokens land either in the current element's children or in the
//! value of the attribute being read, depending on where the builder is in
//! the tag.

/// The builder state machine.
pub mod core;
/// Close tag mismatch reporting.
pub mod error;
/// Human-readable tree dumps.
pub mod print;

use sprig_dom::MarkupTree;

use crate::scanner::Token;

pub use self::core::TreeBuilder;
pub use error::{BuildError, ParseIssue};
pub use print::{dump_tree, print_tree};

/// Build a tree from a token stream with a fresh builder.
#[must_use]
pub fn build(tokens: &[Token]) -> MarkupTree {
    TreeBuilder::new(tokens).run()
}
