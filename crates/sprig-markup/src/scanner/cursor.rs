//! Input cursor with one-character pushback and fixed-length lookahead.
//!
//! Positions are byte offsets into the source and always sit on UTF-8
//! character boundaries.

/// Cursor over the scanner input.
///
/// Each call to [`Cursor::advance`] moves to the next character, unless the
/// previous character was pushed back, in which case the same character is
/// returned again.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    /// Offset of the current character.
    pos: usize,
    /// Offset of the character after the current one.
    next: usize,
    current: Option<char>,
    pushed_back: bool,
}

impl<'a> Cursor<'a> {
    /// Create a cursor positioned before the first character.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            next: 0,
            current: None,
            pushed_back: false,
        }
    }

    /// Consume the next input character.
    ///
    /// Returns `None` at end of input.
    pub fn advance(&mut self) -> Option<char> {
        if self.pushed_back {
            self.pushed_back = false;
            return self.current;
        }
        self.pos = self.next;
        self.current = self.source[self.pos..].chars().next();
        if let Some(c) = self.current {
            self.next = self.pos + c.len_utf8();
        }
        self.current
    }

    /// Unconsume the current character: the next [`Cursor::advance`] returns
    /// it again.
    pub fn push_back(&mut self) {
        debug_assert!(!self.pushed_back, "character pushed back twice");
        self.pushed_back = true;
    }

    /// Offset of the current character (the input length once exhausted).
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns true if the input at the current character starts with `marker`.
    #[must_use]
    pub fn lookahead_is(&self, marker: &str) -> bool {
        self.source[self.pos..].starts_with(marker)
    }

    /// Returns true if the input at the current character starts with `marker`,
    /// compared ASCII case-insensitively.
    #[must_use]
    pub fn lookahead_is_ignore_case(&self, marker: &str) -> bool {
        self.source
            .get(self.pos..self.pos + marker.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(marker))
    }

    /// Skip a marker that was just matched by lookahead, so the next
    /// [`Cursor::advance`] lands on the character after it.
    ///
    /// `marker` must be ASCII and must have matched at the current position.
    pub fn skip(&mut self, marker: &str) {
        debug_assert!(self.lookahead_is_ignore_case(marker));
        self.pushed_back = false;
        self.next = self.pos + marker.len();
    }

    /// The source text from `start` up to, not including, the current character.
    #[must_use]
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_walks_characters_then_stops() {
        let mut cursor = Cursor::new("aé<");
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.advance(), Some('é'));
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.advance(), Some('<'));
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn push_back_repeats_current_character() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.advance(), Some('a'));
        cursor.push_back();
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.advance(), Some('b'));
    }

    #[test]
    fn lookahead_does_not_consume() {
        let mut cursor = Cursor::new("DocType html");
        assert_eq!(cursor.advance(), Some('D'));
        assert!(cursor.lookahead_is_ignore_case("doctype"));
        assert!(!cursor.lookahead_is("doctype"));
        assert!(!cursor.lookahead_is_ignore_case("doctype html and more"));
        assert_eq!(cursor.advance(), Some('o'));
    }

    #[test]
    fn lookahead_across_multibyte_boundary_is_false() {
        let mut cursor = Cursor::new("-é");
        assert_eq!(cursor.advance(), Some('-'));
        // "-é" is 3 bytes; a 2-byte window would split 'é'.
        assert!(!cursor.lookahead_is_ignore_case("--"));
    }

    #[test]
    fn skip_lands_after_marker() {
        let mut cursor = Cursor::new("-->x");
        assert_eq!(cursor.advance(), Some('-'));
        cursor.skip("-->");
        assert_eq!(cursor.advance(), Some('x'));
    }

    #[test]
    fn slice_excludes_current_character() {
        let mut cursor = Cursor::new("abc>");
        for _ in 0..4 {
            let _ = cursor.advance();
        }
        assert_eq!(cursor.slice_from(0), "abc");
    }
}
