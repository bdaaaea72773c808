use strum_macros::Display;

use super::cursor::Cursor;
use super::token::Token;

/// The scanner state machine.
///
/// Every state consumes exactly one character per step. A state that needs
/// another state to look at the same character pushes it back first
/// ("reconsume").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ScannerState {
    /// Text content between tags.
    Data,
    /// After `<`.
    TagOpen,
    /// Waiting for the `>` that closes an opening tag's attribute list.
    EndTagOpen,
    /// Inside the name of an opening tag.
    TagName,
    /// Inside the name of a closing tag (after `</`).
    TagClose,
    /// Between attributes, skipping whitespace.
    BeforeAttributeName,
    /// Inside an attribute name.
    AttributeName,
    /// After an attribute name, before `=` or the next attribute.
    AfterAttributeName,
    /// After `=`, before the value.
    BeforeAttributeValue,
    /// Inside a `'...'` value.
    AttributeValueSingleQuoted,
    /// Inside a `"..."` value.
    AttributeValueDoubleQuoted,
    /// Inside a value without quotes.
    AttributeValueUnquoted,
    /// Right after the closing quote of a value.
    AfterAttributeValueQuoted,
    /// After `/` inside a tag.
    SelfClosing,
    /// After `&`, collecting an entity name.
    CharacterReference,
    /// After `<!`, deciding between comment, doctype and CDATA.
    MarkupDeclarationOpen,
    /// Inside `<!--...-->`.
    Comment,
    /// Inside `<![CDATA[...]]>`.
    CDATASection,
    /// Inside `<!DOCTYPE...>`.
    Doctype,
    /// Processing instructions. No transition leads here yet.
    Processing,
}

/// Markup scanner.
///
/// Holds the whole per-input context: cursor, state, return state, pending
/// section start and the emitted tokens. A scanner is built for one input and
/// consumed by [`Scanner::into_tokens`], so no state can leak from one input
/// into another.
pub struct Scanner<'a> {
    pub(super) cursor: Cursor<'a>,
    pub(super) state: ScannerState,
    /// State to resume once a character reference ends.
    pub(super) return_state: ScannerState,
    /// Offset where the pending run (text, name, value, body) begins.
    pub(super) section_start: Option<usize>,
    /// Offset of the `&` that opened the current character reference.
    pub(super) reference_start: usize,
    pub(super) token_stream: Vec<Token>,
    /// If true, `>` after an attribute name emits `OPEN_TAG_END`.
    recover_tag_ends: bool,
    /// If true, text pending at end of input is emitted.
    keep_trailing_text: bool,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input, in the data state.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            state: ScannerState::Data,
            return_state: ScannerState::Data,
            section_start: None,
            reference_start: 0,
            token_stream: Vec::new(),
            recover_tag_ends: false,
            keep_trailing_text: false,
        }
    }

    /// Close the attribute list on a `>` that follows an attribute name, as
    /// in `<div >` or `<input disabled>`. By default that `>` only returns
    /// to the data state and no `OPEN_TAG_END` is emitted.
    #[must_use]
    pub const fn with_tag_end_recovery(mut self) -> Self {
        self.recover_tag_ends = true;
        self
    }

    /// Emit a text run still pending at end of input. By default it is
    /// discarded like any other unterminated construct.
    #[must_use]
    pub const fn with_trailing_text(mut self) -> Self {
        self.keep_trailing_text = true;
        self
    }

    /// Current state of the machine.
    #[must_use]
    pub const fn state(&self) -> ScannerState {
        self.state
    }

    /// Tokens emitted so far.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.token_stream
    }

    /// Consume the scanner and return the token stream.
    /// Call this after [`Scanner::run`].
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// Run the scanner to the end of the input.
    pub fn run(&mut self) {
        while let Some(c) = self.cursor.advance() {
            self.step(c);
        }
        self.finish();
    }

    fn step(&mut self, c: char) {
        match self.state {
            ScannerState::Data => self.handle_data_state(c),
            ScannerState::TagOpen => self.handle_tag_open_state(c),
            ScannerState::EndTagOpen => self.handle_end_tag_open_state(c),
            ScannerState::TagName => self.handle_tag_name_state(c),
            ScannerState::TagClose => self.handle_tag_close_state(c),
            ScannerState::BeforeAttributeName => self.handle_before_attribute_name_state(c),
            ScannerState::AttributeName => self.handle_attribute_name_state(c),
            ScannerState::AfterAttributeName => self.handle_after_attribute_name_state(c),
            ScannerState::BeforeAttributeValue => self.handle_before_attribute_value_state(c),
            ScannerState::AttributeValueSingleQuoted => {
                self.handle_attribute_value_quoted_state(c, '\'');
            }
            ScannerState::AttributeValueDoubleQuoted => {
                self.handle_attribute_value_quoted_state(c, '"');
            }
            ScannerState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(c),
            ScannerState::AfterAttributeValueQuoted => {
                self.handle_after_attribute_value_quoted_state(c);
            }
            ScannerState::SelfClosing => self.handle_self_closing_state(c),
            ScannerState::CharacterReference => self.handle_character_reference_state(c),
            ScannerState::MarkupDeclarationOpen => self.handle_markup_declaration_open_state(),
            ScannerState::Comment => self.handle_comment_state(),
            ScannerState::CDATASection => self.handle_cdata_section_state(),
            ScannerState::Doctype => self.handle_doctype_state(c),
            ScannerState::Processing => {}
        }
    }

    /// End of input. Whatever is still pending is dropped, unless trailing
    /// text was asked for and the scanner is in the data state.
    fn finish(&mut self) {
        if self.keep_trailing_text && self.state == ScannerState::Data {
            self.emit_text();
        }
        self.section_start = None;
    }

    fn handle_data_state(&mut self, c: char) {
        match c {
            '<' => {
                self.emit_text();
                self.switch_to(ScannerState::TagOpen);
            }
            '&' => {
                self.emit_text();
                self.begin_character_reference(ScannerState::Data);
            }
            _ => self.mark_section_start(),
        }
    }

    fn handle_tag_open_state(&mut self, c: char) {
        match c {
            '!' => self.switch_to(ScannerState::MarkupDeclarationOpen),
            '/' => self.switch_to(ScannerState::TagClose),
            c if Self::is_letter(c) => self.reconsume_in(ScannerState::TagName),
            // `<` followed by anything else is tolerated and skipped.
            _ => {}
        }
    }

    fn handle_tag_close_state(&mut self, c: char) {
        match c {
            '>' => {
                if let Some(tag) = self.take_section() {
                    self.emit(Token::CloseTag { tag });
                }
                self.switch_to(ScannerState::Data);
            }
            c if Self::is_letter(c) => self.mark_section_start(),
            // Digits and other characters stay in the name once it has
            // started (`</h1>`), and are skipped before it.
            _ => {}
        }
    }

    fn handle_tag_name_state(&mut self, c: char) {
        match c {
            c if Self::is_whitespace(c) => {
                self.emit_open_tag_start();
                self.switch_to(ScannerState::BeforeAttributeName);
            }
            '/' => {
                self.emit_open_tag_start();
                self.switch_to(ScannerState::SelfClosing);
            }
            '>' => {
                self.emit_open_tag_start();
                self.reconsume_in(ScannerState::EndTagOpen);
            }
            _ => self.mark_section_start(),
        }
    }

    fn handle_end_tag_open_state(&mut self, c: char) {
        if c == '>' {
            self.emit(Token::OpenTagEnd);
            self.switch_to(ScannerState::Data);
        }
    }

    fn handle_before_attribute_name_state(&mut self, c: char) {
        match c {
            c if Self::is_whitespace(c) => {}
            '/' | '>' => self.reconsume_in(ScannerState::AfterAttributeName),
            // `=` with no attribute name is tolerated and skipped.
            '=' => {}
            _ => self.reconsume_in(ScannerState::AttributeName),
        }
    }

    fn handle_attribute_name_state(&mut self, c: char) {
        match c {
            c if c == '/' || c == '>' || Self::is_whitespace(c) => {
                self.emit_attribute_name();
                self.reconsume_in(ScannerState::AfterAttributeName);
            }
            '=' => {
                self.emit_attribute_name();
                self.switch_to(ScannerState::BeforeAttributeValue);
            }
            '"' | '\'' | '<' => {}
            _ => self.mark_section_start(),
        }
    }

    fn handle_after_attribute_name_state(&mut self, c: char) {
        match c {
            c if Self::is_whitespace(c) => {}
            '/' => self.switch_to(ScannerState::SelfClosing),
            '=' => self.switch_to(ScannerState::BeforeAttributeValue),
            '>' => {
                if self.recover_tag_ends {
                    self.emit(Token::OpenTagEnd);
                }
                self.switch_to(ScannerState::Data);
            }
            _ => self.reconsume_in(ScannerState::AttributeName),
        }
    }

    fn handle_before_attribute_value_state(&mut self, c: char) {
        match c {
            c if Self::is_whitespace(c) => {}
            '"' => {
                self.emit(Token::AttributeValueStart);
                self.switch_to(ScannerState::AttributeValueDoubleQuoted);
            }
            '\'' => {
                self.emit(Token::AttributeValueStart);
                self.switch_to(ScannerState::AttributeValueSingleQuoted);
            }
            // `name=>` is tolerated; the value starts at the next character.
            '>' => {}
            _ => {
                self.emit(Token::AttributeValueStart);
                self.reconsume_in(ScannerState::AttributeValueUnquoted);
            }
        }
    }

    /// Shared by both quoted value states; `quote` is the closing quote.
    fn handle_attribute_value_quoted_state(&mut self, c: char, quote: char) {
        match c {
            c if c == quote => {
                self.emit_text();
                self.switch_to(ScannerState::AfterAttributeValueQuoted);
            }
            '&' => {
                self.emit_text();
                self.begin_character_reference(self.state);
            }
            _ => self.mark_section_start(),
        }
    }

    fn handle_attribute_value_unquoted_state(&mut self, c: char) {
        match c {
            c if Self::is_whitespace(c) => {
                self.emit_text();
                self.emit(Token::AttributeValueEnd);
                self.switch_to(ScannerState::BeforeAttributeName);
            }
            '&' => {
                self.emit_text();
                self.begin_character_reference(ScannerState::AttributeValueUnquoted);
            }
            '>' => {
                self.emit_text();
                self.emit(Token::AttributeValueEnd);
                self.reconsume_in(ScannerState::EndTagOpen);
            }
            '"' | '\'' | '<' | '=' | '`' => {}
            _ => self.mark_section_start(),
        }
    }

    fn handle_after_attribute_value_quoted_state(&mut self, c: char) {
        match c {
            c if Self::is_whitespace(c) => {
                self.emit(Token::AttributeValueEnd);
                self.switch_to(ScannerState::BeforeAttributeName);
            }
            '/' => {
                self.emit(Token::AttributeValueEnd);
                self.switch_to(ScannerState::SelfClosing);
            }
            '>' => {
                self.emit(Token::AttributeValueEnd);
                self.reconsume_in(ScannerState::EndTagOpen);
            }
            // Missing whitespace before the next attribute is tolerated.
            _ => self.reconsume_in(ScannerState::BeforeAttributeName),
        }
    }

    fn handle_self_closing_state(&mut self, c: char) {
        if c == '>' {
            self.emit(Token::SelfCloseTagEnd);
            self.switch_to(ScannerState::Data);
        } else {
            self.reconsume_in(ScannerState::BeforeAttributeName);
        }
    }

    fn handle_character_reference_state(&mut self, c: char) {
        match c {
            // Not a reference after all: `&name` goes back into the
            // surrounding run and the whitespace is handled by the return state.
            c if Self::is_whitespace(c) => {
                self.section_start = Some(self.reference_start);
                self.reconsume_in(self.return_state);
            }
            ';' => {
                // `&;` has no name and produces nothing.
                if let Some(text) = self.take_section() {
                    self.emit(Token::Entity { text });
                }
                self.switch_to(self.return_state);
            }
            _ => self.mark_section_start(),
        }
    }

    fn handle_markup_declaration_open_state(&mut self) {
        if self.cursor.lookahead_is("--") {
            self.cursor.skip("--");
            self.switch_to(ScannerState::Comment);
        } else if self.cursor.lookahead_is_ignore_case("doctype") {
            self.cursor.skip("doctype");
            self.switch_to(ScannerState::Doctype);
        } else if self.cursor.lookahead_is_ignore_case("[cdata[") {
            self.cursor.skip("[cdata[");
            self.switch_to(ScannerState::CDATASection);
        }
        // Anything else is skipped until one of the markers shows up.
    }

    fn handle_comment_state(&mut self) {
        if self.cursor.lookahead_is("-->") {
            let text = self.take_section().unwrap_or_default();
            self.emit(Token::Comment { text });
            self.cursor.skip("-->");
            self.switch_to(ScannerState::Data);
        } else {
            self.mark_section_start();
        }
    }

    fn handle_cdata_section_state(&mut self) {
        if self.cursor.lookahead_is("]]>") {
            let text = self.take_section().unwrap_or_default();
            self.emit(Token::Cdata { text });
            self.cursor.skip("]]>");
            self.switch_to(ScannerState::Data);
        } else {
            self.mark_section_start();
        }
    }

    fn handle_doctype_state(&mut self, c: char) {
        if c == '>' {
            let text = self.take_section().unwrap_or_default();
            self.emit(Token::Doctype { text });
            self.switch_to(ScannerState::Data);
        } else {
            self.mark_section_start();
        }
    }
}
