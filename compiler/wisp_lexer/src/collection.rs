//! The three lexer configurations the interpreter works with.

use crate::lexer::Lexer;

/// Characters that form operator runs in expressions (`+`, `<=`, `&&`, ...).
pub fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '/' | '%' | '=' | '<' | '>' | '!' | '&' | '|' | '^' | '~'
    )
}

/// Lexers used for whole scripts, expressions and argument lists.
///
/// Part of every registry snapshot: replacing a configuration changes how
/// subsequently preprocessed or evaluated text is split.
#[derive(Clone, Debug)]
pub struct LexerCollection {
    /// Splits a whole script into declarations and statement lines.
    pub preprocess: Lexer,
    /// Splits one expression into operands and operators.
    pub expression: Lexer,
    /// Splits the inside of a call capsule on top-level commas.
    pub argument_list: Lexer,
}

impl LexerCollection {
    /// Lexers that accept nothing special; every input is a single word.
    pub fn empty() -> Self {
        LexerCollection {
            preprocess: Lexer::new(),
            expression: Lexer::new(),
            argument_list: Lexer::new(),
        }
    }

    pub fn default_preprocess() -> Lexer {
        Lexer::new()
            .string_quote('"')
            .capsule('(', ')')
            .capsule('[', ']')
            .ignore(' ')
            .ignore('\t')
            .ignore('\r')
            .line_break('\n')
            .line_comment('#')
            .extract('@')
            .keep_escapes()
    }

    pub fn default_expression() -> Lexer {
        Lexer::new()
            .string_quote('"')
            .capsule('(', ')')
            .capsule('[', ']')
            .capsule('{', '}')
            .extract_run(is_operator_char)
            .ignore(' ')
            .ignore('\t')
            .ignore('\r')
            .ignore('\n')
            .escape('t', '\t')
            .escape('n', '\n')
            .escape('r', '\r')
            .escape('\\', '\\')
            .escape('"', '"')
    }

    pub fn default_argument_list() -> Lexer {
        Lexer::new()
            .capsule('(', ')')
            .capsule('[', ']')
            .capsule('{', '}')
            .string_quote('"')
            .ignore(' ')
            .ignore('\t')
            .ignore('\r')
            .ignore('\n')
            .keep_escapes()
            .extract_run(is_operator_char)
            .extract(',')
    }
}

impl Default for LexerCollection {
    fn default() -> Self {
        LexerCollection {
            preprocess: Self::default_preprocess(),
            expression: Self::default_expression(),
            argument_list: Self::default_argument_list(),
        }
    }
}
