use core::fmt;

use serde::Serialize;
use strum_macros::Display;

/// A token emitted by the scanner.
///
/// Tokens are immutable once emitted, and the order in which they are emitted
/// is exactly document order. A tag is not a single token: its start, each
/// attribute piece and its end are separate tokens, so the tree builder can
/// fold them one at a time.
///
/// Serializes as `{"type": "OPEN_TAG_START", "tag": "div"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Token {
    /// `<!DOCTYPE ...>`. Text is everything after the keyword, verbatim.
    Doctype {
        /// Declaration body, leading whitespace included.
        text: String,
    },
    /// `<name` of an opening tag. Attributes follow as separate tokens.
    OpenTagStart {
        /// Tag name as written.
        tag: String,
    },
    /// `>` closing the attribute list of an opening tag.
    OpenTagEnd,
    /// `/>` closing a self-closing tag.
    SelfCloseTagEnd,
    /// `</name>`.
    CloseTag {
        /// Tag name as written.
        tag: String,
    },
    /// An attribute name inside an opening tag.
    AttributeName {
        /// Attribute name as written.
        name: String,
    },
    /// Start of an attribute value (after `=`).
    AttributeValueStart,
    /// End of an attribute value.
    AttributeValueEnd,
    /// A run of text, either content or part of an attribute value.
    /// Never empty and never whitespace-only.
    Text {
        /// The raw text.
        text: String,
    },
    /// `&name;`, captured by name and never decoded.
    Entity {
        /// Entity name without `&` and `;`.
        text: String,
    },
    /// `<!--...-->`.
    Comment {
        /// Everything between the markers.
        text: String,
    },
    /// `<![CDATA[...]]>`.
    Cdata {
        /// Everything between the markers.
        text: String,
    },
}

/// The payload-free kind of a [`Token`].
///
/// Displays as the upper-case kind name, e.g. `OPEN_TAG_START`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// See [`Token::Doctype`].
    Doctype,
    /// See [`Token::OpenTagStart`].
    OpenTagStart,
    /// See [`Token::OpenTagEnd`].
    OpenTagEnd,
    /// See [`Token::SelfCloseTagEnd`].
    SelfCloseTagEnd,
    /// See [`Token::CloseTag`].
    CloseTag,
    /// See [`Token::AttributeName`].
    AttributeName,
    /// See [`Token::AttributeValueStart`].
    AttributeValueStart,
    /// See [`Token::AttributeValueEnd`].
    AttributeValueEnd,
    /// See [`Token::Text`].
    Text,
    /// See [`Token::Entity`].
    Entity,
    /// See [`Token::Comment`].
    Comment,
    /// See [`Token::Cdata`].
    Cdata,
}

impl Token {
    /// Create a doctype token.
    #[must_use]
    pub fn doctype(text: impl Into<String>) -> Self {
        Self::Doctype { text: text.into() }
    }

    /// Create an opening tag start token.
    #[must_use]
    pub fn open_tag_start(tag: impl Into<String>) -> Self {
        Self::OpenTagStart { tag: tag.into() }
    }

    /// Create a closing tag token.
    #[must_use]
    pub fn close_tag(tag: impl Into<String>) -> Self {
        Self::CloseTag { tag: tag.into() }
    }

    /// Create an attribute name token.
    #[must_use]
    pub fn attribute_name(name: impl Into<String>) -> Self {
        Self::AttributeName { name: name.into() }
    }

    /// Create a text token.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an entity token.
    #[must_use]
    pub fn entity(text: impl Into<String>) -> Self {
        Self::Entity { text: text.into() }
    }

    /// Create a comment token.
    #[must_use]
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment { text: text.into() }
    }

    /// Create a CDATA token.
    #[must_use]
    pub fn cdata(text: impl Into<String>) -> Self {
        Self::Cdata { text: text.into() }
    }

    /// The kind of this token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Doctype { .. } => TokenKind::Doctype,
            Self::OpenTagStart { .. } => TokenKind::OpenTagStart,
            Self::OpenTagEnd => TokenKind::OpenTagEnd,
            Self::SelfCloseTagEnd => TokenKind::SelfCloseTagEnd,
            Self::CloseTag { .. } => TokenKind::CloseTag,
            Self::AttributeName { .. } => TokenKind::AttributeName,
            Self::AttributeValueStart => TokenKind::AttributeValueStart,
            Self::AttributeValueEnd => TokenKind::AttributeValueEnd,
            Self::Text { .. } => TokenKind::Text,
            Self::Entity { .. } => TokenKind::Entity,
            Self::Comment { .. } => TokenKind::Comment,
            Self::Cdata { .. } => TokenKind::Cdata,
        }
    }

    /// The string payload, for the kinds that carry one.
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Doctype { text }
            | Self::Text { text }
            | Self::Entity { text }
            | Self::Comment { text }
            | Self::Cdata { text } => Some(text),
            Self::OpenTagStart { tag } | Self::CloseTag { tag } => Some(tag),
            Self::AttributeName { name } => Some(name),
            Self::OpenTagEnd
            | Self::SelfCloseTagEnd
            | Self::AttributeValueStart
            | Self::AttributeValueEnd => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.payload() {
            Some(payload) => write!(f, "{}({payload:?})", self.kind()),
            None => write!(f, "{}", self.kind()),
        }
    }
}
