//! The `lex` command: dump the token stream the preprocessor sees.

use wisp_lexer::{LexerCollection, TokenKind};

use super::read_file;

pub fn lex_file(path: &str) {
    let content = read_file(path);
    let tokens = match LexerCollection::default_preprocess().lex(&content) {
        Ok(tokens) => tokens,
        Err(err) => {
            eprintln!("error in '{path}': {err}");
            std::process::exit(1);
        }
    };

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in &tokens {
        let kind = match token.kind {
            TokenKind::Str => "str",
            TokenKind::Capsule { .. } => "capsule",
            TokenKind::Bare => "bare",
        };
        println!("  {:>4}  {kind:<8} {token} @ {}..{}", token.line, token.span.start, token.span.end);
    }
}
