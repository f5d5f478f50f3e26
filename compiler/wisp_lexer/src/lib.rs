//! Wisp Lexer - a small configurable tokenizer.
//!
//! The interpreter never hard-codes its token grammar. Instead it owns a
//! [`LexerCollection`] of three [`Lexer`] configurations (one for whole
//! scripts, one for expressions, one for argument lists) which hosts and
//! extensions may replace. Each configuration decides which characters
//! quote strings, which pairs form capsules, which characters separate
//! tokens and which are extracted as tokens of their own.
//!
//! # Token model
//!
//! A [`Token`] is either a quoted string (`Str`, contents unescaped), a
//! capsule (`Capsule`, a bracketed span kept verbatim including its
//! brackets) or a bare word (`Bare`). Every token records its byte
//! [`Span`] in the lexed text and the 1-based line it starts on, so callers
//! can slice the original text back out of a token run.

mod collection;
mod lexer;
mod token;

pub use collection::{is_operator_char, LexerCollection};
pub use lexer::{CharClass, LexError, Lexer};
pub use token::{Span, Token, TokenKind};
