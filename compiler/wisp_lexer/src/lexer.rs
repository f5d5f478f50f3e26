//! The configurable scanner.
//!
//! A [`Lexer`] is plain configuration: it is cheap to clone, can be stored
//! in registry snapshots, and every call to [`Lexer::lex`] runs a fresh
//! [`Scan`] over the input.

use thiserror::Error;

use crate::token::{Span, Token, TokenKind};

/// Predicate selecting characters that group into runs (operator runs).
pub type CharClass = fn(char) -> bool;

/// Errors reported while scanning.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal starting on line {line}")]
    UnterminatedString { line: u32 },
    #[error("unterminated `{open}` starting on line {line}")]
    UnterminatedCapsule { open: char, line: u32 },
    #[error("expected `{expected}` but found `{found}` on line {line}")]
    MismatchedCloser {
        expected: char,
        found: char,
        line: u32,
    },
    #[error("unexpected `{found}` on line {line}")]
    StrayCloser { found: char, line: u32 },
}

impl LexError {
    pub fn line(&self) -> u32 {
        match self {
            LexError::UnterminatedString { line }
            | LexError::UnterminatedCapsule { line, .. }
            | LexError::MismatchedCloser { line, .. }
            | LexError::StrayCloser { line, .. } => *line,
        }
    }
}

/// Tokenizer configuration.
///
/// Built with chained setters:
///
/// ```
/// use wisp_lexer::Lexer;
///
/// let lexer = Lexer::new()
///     .string_quote('"')
///     .capsule('(', ')')
///     .ignore(' ')
///     .extract(',');
/// let tokens = lexer.lex(r#"say("hi"), 2"#).unwrap_or_default();
/// assert_eq!(tokens.len(), 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Lexer {
    capsules: Vec<(char, char)>,
    quotes: Vec<char>,
    ignored: Vec<char>,
    extracted: Vec<char>,
    run_class: Option<CharClass>,
    line_breaks: Vec<char>,
    line_comments: Vec<char>,
    escapes: Vec<(char, char)>,
    keep_escapes: bool,
}

impl Lexer {
    /// A lexer with no rules: the whole input is one bare word.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `open ... close` as one opaque token (nesting-aware).
    #[must_use]
    pub fn capsule(mut self, open: char, close: char) -> Self {
        self.capsules.push((open, close));
        self
    }

    #[must_use]
    pub fn string_quote(mut self, quote: char) -> Self {
        self.quotes.push(quote);
        self
    }

    /// Separate tokens on `c` and drop it.
    #[must_use]
    pub fn ignore(mut self, c: char) -> Self {
        self.ignored.push(c);
        self
    }

    /// Emit `c` as a token of its own.
    #[must_use]
    pub fn extract(mut self, c: char) -> Self {
        self.extracted.push(c);
        self
    }

    /// Emit every maximal run of characters matching `class` as one token.
    #[must_use]
    pub fn extract_run(mut self, class: CharClass) -> Self {
        self.run_class = Some(class);
        self
    }

    /// Separate tokens on `c`; lines are always counted on `\n`.
    #[must_use]
    pub fn line_break(mut self, c: char) -> Self {
        self.line_breaks.push(c);
        self
    }

    /// Skip from `c` to the end of the line.
    #[must_use]
    pub fn line_comment(mut self, c: char) -> Self {
        self.line_comments.push(c);
        self
    }

    /// Inside strings, `\c` becomes `replacement`.
    #[must_use]
    pub fn escape(mut self, c: char, replacement: char) -> Self {
        self.escapes.push((c, replacement));
        self
    }

    /// Keep backslash sequences in string contents untouched.
    #[must_use]
    pub fn keep_escapes(mut self) -> Self {
        self.keep_escapes = true;
        self
    }

    /// Split `text` into tokens.
    pub fn lex(&self, text: &str) -> Result<Vec<Token>, LexError> {
        let mut scan = Scan {
            lexer: self,
            text,
            pos: 0,
            line: 1,
            word: None,
            tokens: Vec::new(),
        };
        scan.run()?;
        Ok(scan.tokens)
    }

    fn closer_for(&self, open: char) -> Option<char> {
        self.capsules
            .iter()
            .find(|(o, _)| *o == open)
            .map(|(_, close)| *close)
    }

    fn is_closer(&self, c: char) -> bool {
        self.capsules.iter().any(|(_, close)| *close == c)
    }

    fn is_separator(&self, c: char) -> bool {
        self.ignored.contains(&c) || self.line_breaks.contains(&c)
    }

    fn unescape(&self, c: char) -> char {
        self.escapes
            .iter()
            .find(|(from, _)| *from == c)
            .map_or(c, |(_, to)| *to)
    }
}

/// State of one `lex` call.
struct Scan<'a> {
    lexer: &'a Lexer,
    text: &'a str,
    pos: usize,
    line: u32,
    /// Start offset and line of the bare word being accumulated.
    word: Option<(usize, u32)>,
    tokens: Vec<Token>,
}

impl Scan<'_> {
    #[inline]
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn run(&mut self) -> Result<(), LexError> {
        let lexer = self.lexer;
        while let Some(c) = self.peek() {
            if lexer.line_comments.contains(&c) {
                self.flush_word();
                self.skip_comment();
            } else if lexer.quotes.contains(&c) {
                self.flush_word();
                self.string(c)?;
            } else if let Some(close) = lexer.closer_for(c) {
                self.flush_word();
                self.capsule(c, close)?;
            } else if lexer.is_closer(c) {
                return Err(LexError::StrayCloser {
                    found: c,
                    line: self.line,
                });
            } else if lexer.is_separator(c) {
                self.flush_word();
                self.bump();
            } else if lexer.extracted.contains(&c) {
                self.flush_word();
                let (start, line) = (self.pos, self.line);
                self.bump();
                self.push_bare(start, line);
            } else if let Some(class) = lexer.run_class.filter(|class| class(c)) {
                self.flush_word();
                let (start, line) = (self.pos, self.line);
                while self.peek().is_some_and(class) {
                    self.bump();
                }
                self.push_bare(start, line);
            } else {
                if self.word.is_none() {
                    self.word = Some((self.pos, self.line));
                }
                self.bump();
            }
        }
        self.flush_word();
        Ok(())
    }

    fn push_bare(&mut self, start: usize, line: u32) {
        let text = &self.text[start..self.pos];
        self.tokens.push(Token::new(
            TokenKind::Bare,
            text,
            Span::new(start, self.pos),
            line,
        ));
    }

    fn flush_word(&mut self) {
        if let Some((start, line)) = self.word.take() {
            self.push_bare(start, line);
        }
    }

    /// Advance to the next newline without consuming it.
    fn skip_comment(&mut self) {
        let rest = &self.text.as_bytes()[self.pos..];
        self.pos = match memchr::memchr(b'\n', rest) {
            Some(offset) => self.pos + offset,
            None => self.text.len(),
        };
    }

    fn string(&mut self, quote: char) -> Result<(), LexError> {
        let (start, line) = (self.pos, self.line);
        self.bump();
        let mut contents = String::new();
        loop {
            match self.bump() {
                None => return Err(LexError::UnterminatedString { line }),
                Some('\\') => {
                    let Some(escaped) = self.bump() else {
                        return Err(LexError::UnterminatedString { line });
                    };
                    if self.lexer.keep_escapes {
                        contents.push('\\');
                        contents.push(escaped);
                    } else {
                        contents.push(self.lexer.unescape(escaped));
                    }
                }
                Some(c) if c == quote => break,
                Some(c) => contents.push(c),
            }
        }
        self.tokens.push(Token::new(
            TokenKind::Str,
            contents,
            Span::new(start, self.pos),
            line,
        ));
        Ok(())
    }

    /// Skip a quoted string inside a capsule, keeping it verbatim.
    fn skip_string(&mut self, quote: char) -> Result<(), LexError> {
        let line = self.line;
        self.bump();
        loop {
            match self.bump() {
                None => return Err(LexError::UnterminatedString { line }),
                Some('\\') => {
                    if self.bump().is_none() {
                        return Err(LexError::UnterminatedString { line });
                    }
                }
                Some(c) if c == quote => return Ok(()),
                Some(_) => {}
            }
        }
    }

    fn capsule(&mut self, open: char, close: char) -> Result<(), LexError> {
        let (start, line) = (self.pos, self.line);
        self.bump();
        let mut closers = vec![close];
        while let Some(&expected) = closers.last() {
            let Some(c) = self.peek() else {
                return Err(LexError::UnterminatedCapsule { open, line });
            };
            if self.lexer.quotes.contains(&c) {
                self.skip_string(c)?;
                continue;
            }
            self.bump();
            if c == expected {
                closers.pop();
            } else if let Some(nested) = self.lexer.closer_for(c) {
                closers.push(nested);
            } else if self.lexer.is_closer(c) {
                return Err(LexError::MismatchedCloser {
                    expected,
                    found: c,
                    line: self.line,
                });
            }
        }
        let text = &self.text[start..self.pos];
        self.tokens.push(Token::new(
            TokenKind::Capsule { open, close },
            text,
            Span::new(start, self.pos),
            line,
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests;
