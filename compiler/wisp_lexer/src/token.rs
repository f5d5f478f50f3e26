//! Token and span types produced by [`Lexer::lex`](crate::Lexer::lex).

use std::fmt;

/// Byte range of a token in the text it was lexed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    #[must_use]
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    #[inline]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// What kind of text a token holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Quoted string literal. `Token::text` holds the unquoted contents.
    Str,
    /// Bracketed span such as `(1, 2)`; `Token::text` keeps the brackets.
    Capsule { open: char, close: char },
    /// Anything else: identifiers, numbers, operator runs.
    Bare,
}

/// A single lexed token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
    /// 1-based line the token starts on.
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span, line: u32) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
            line,
        }
    }

    /// Convenience constructor for a bare word without position information.
    pub fn bare(text: impl Into<String>) -> Self {
        let text = text.into();
        let span = Span::new(0, text.len());
        Token::new(TokenKind::Bare, text, span, 1)
    }

    /// Convenience constructor for a string token without position information.
    pub fn string(contents: impl Into<String>) -> Self {
        let text = contents.into();
        let span = Span::new(0, text.len() + 2);
        Token::new(TokenKind::Str, text, span, 1)
    }

    #[inline]
    pub fn is_str(&self) -> bool {
        matches!(self.kind, TokenKind::Str)
    }

    /// True for unquoted tokens (bare words and capsules).
    #[inline]
    pub fn is_unquoted(&self) -> bool {
        !self.is_str()
    }

    #[inline]
    pub fn is_bare_word(&self) -> bool {
        matches!(self.kind, TokenKind::Bare)
    }

    /// True if this is a bare word equal to `word`.
    #[inline]
    pub fn is_word(&self, word: &str) -> bool {
        self.is_bare_word() && self.text == word
    }

    /// True if this is a capsule opened with `open`.
    #[inline]
    pub fn is_capsule(&self, open: char) -> bool {
        matches!(self.kind, TokenKind::Capsule { open: o, .. } if o == open)
    }

    /// Text between the brackets of a capsule token.
    pub fn capsule_inner(&self) -> Option<&str> {
        match self.kind {
            TokenKind::Capsule { open, close } => self
                .text
                .strip_prefix(open)
                .and_then(|rest| rest.strip_suffix(close)),
            TokenKind::Str | TokenKind::Bare => None,
        }
    }

    /// Byte offset of the capsule contents in the lexed text.
    pub fn capsule_inner_offset(&self) -> Option<usize> {
        match self.kind {
            TokenKind::Capsule { open, .. } => Some(self.span.start + open.len_utf8()),
            TokenKind::Str | TokenKind::Bare => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Str => write!(f, "\"{}\"", self.text),
            TokenKind::Capsule { .. } | TokenKind::Bare => f.write_str(&self.text),
        }
    }
}
