use thiserror::Error;

/// A close tag that does not line up with the element it closes.
///
/// The default build never fails on these; they surface only through
/// [`TreeBuilder::run_with_issues`](super::TreeBuilder::run_with_issues) and
/// strict mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// `</found>` closed an element named `expected`.
    #[error("close tag </{found}> does not match open element <{expected}> (token {token_index})")]
    MismatchedCloseTag {
        /// Tag name of the element being closed.
        expected: String,
        /// Tag name written in the close tag.
        found: String,
        /// Index of the close tag in the token stream.
        token_index: usize,
    },
    /// `</found>` with no element open.
    #[error("close tag </{found}> has no open element (token {token_index})")]
    UnexpectedCloseTag {
        /// Tag name written in the close tag.
        found: String,
        /// Index of the close tag in the token stream.
        token_index: usize,
    },
}

impl BuildError {
    /// Index of the offending token in the token stream.
    #[must_use]
    pub const fn token_index(&self) -> usize {
        match self {
            Self::MismatchedCloseTag { token_index, .. }
            | Self::UnexpectedCloseTag { token_index, .. } => *token_index,
        }
    }
}

/// A non-fatal problem noticed while building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Human-readable description.
    pub message: String,
    /// Index into the token stream where this issue was encountered.
    pub token_index: usize,
}

impl From<&BuildError> for ParseIssue {
    fn from(error: &BuildError) -> Self {
        Self {
            message: error.to_string(),
            token_index: error.token_index(),
        }
    }
}
