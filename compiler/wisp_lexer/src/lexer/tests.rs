#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::{is_operator_char, LexerCollection};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

#[test]
fn expression_splits_operators_and_operands() {
    let lexer = LexerCollection::default_expression();
    let tokens = lexer.lex("$y-1 <= 10").unwrap();
    assert_eq!(texts(&tokens), vec!["$y", "-", "1", "<=", "10"]);
    assert!(tokens.iter().all(Token::is_bare_word));
}

#[test]
fn string_escapes_are_resolved_in_expressions() {
    let lexer = LexerCollection::default_expression();
    let tokens = lexer.lex(r#""a\"b\n" + "c""#).unwrap();
    assert_eq!(tokens.len(), 3);
    assert!(tokens[0].is_str());
    assert_eq!(tokens[0].text, "a\"b\n");
    assert_eq!(tokens[0].span, Span::new(0, 8));
    assert_eq!(tokens[2].text, "c");
}

#[test]
fn kept_escapes_stay_verbatim() {
    let lexer = Lexer::new().string_quote('"').keep_escapes();
    let tokens = lexer.lex(r#""x\ty""#).unwrap();
    assert_eq!(tokens[0].text, r"x\ty");
}

#[test]
fn empty_string_is_a_token() {
    let lexer = LexerCollection::default_expression();
    let tokens = lexer.lex(r#""""#).unwrap();
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_str());
    assert_eq!(tokens[0].text, "");
}

#[test]
fn capsules_nest_and_skip_quoted_brackets() {
    let lexer = LexerCollection::default_expression();
    let tokens = lexer.lex(r#"call(f, [1, (2)], ")") + 1"#).unwrap();
    assert_eq!(
        texts(&tokens),
        vec!["call", r#"(f, [1, (2)], ")")"#, "+", "1"]
    );
    assert!(tokens[1].is_capsule('('));
    assert_eq!(tokens[1].capsule_inner(), Some(r#"f, [1, (2)], ")""#));
    assert_eq!(tokens[1].capsule_inner_offset(), Some(5));
}

#[test]
fn argument_list_extracts_commas_outside_capsules() {
    let lexer = LexerCollection::default_argument_list();
    let tokens = lexer.lex(r#"mul, $x, f(1, 2), "a,b""#).unwrap();
    assert_eq!(
        texts(&tokens),
        vec!["mul", ",", "$x", ",", "f", "(1, 2)", ",", "a,b"]
    );
}

#[test]
fn preprocess_tracks_lines_and_skips_comments() {
    let lexer = LexerCollection::default_preprocess();
    let source = "# header\n@main[]\n    echoln(\"#not a comment\") # trailing\n";
    let tokens = lexer.lex(source).unwrap();
    assert_eq!(texts(&tokens), vec!["@", "main", "[]", "echoln", "(\"#not a comment\")"]);
    assert_eq!(tokens[0].line, 2);
    assert_eq!(tokens[3].line, 3);
    assert_eq!(&source[tokens[4].span.start..tokens[4].span.end], "(\"#not a comment\")");
}

#[test]
fn multiline_capsule_keeps_its_start_line() {
    let lexer = LexerCollection::default_preprocess();
    let tokens = lexer.lex("@const[\n  a = 1\n  b = 2\n]\n@main[]\nx").unwrap();
    assert_eq!(tokens[2].line, 1);
    assert!(tokens[2].is_capsule('['));
    assert_eq!(tokens[3].line, 5);
    assert_eq!(tokens[6].line, 6);
}

#[test]
fn unterminated_string_reports_start_line() {
    let lexer = LexerCollection::default_expression();
    let err = lexer.lex("1 +\n \"abc").unwrap_err();
    assert_eq!(err, LexError::UnterminatedString { line: 2 });
}

#[test]
fn unterminated_capsule_is_an_error() {
    let lexer = LexerCollection::default_expression();
    let err = lexer.lex("f(1, [2)").unwrap_err();
    assert_eq!(
        err,
        LexError::MismatchedCloser {
            expected: ']',
            found: ')',
            line: 1
        }
    );
    assert!(matches!(
        lexer.lex("f(1, 2").unwrap_err(),
        LexError::UnterminatedCapsule { open: '(', line: 1 }
    ));
}

#[test]
fn stray_closer_is_an_error() {
    let lexer = LexerCollection::default_expression();
    assert_eq!(
        lexer.lex("1 )").unwrap_err(),
        LexError::StrayCloser {
            found: ')',
            line: 1
        }
    );
}

#[test]
fn unconfigured_lexer_returns_one_word() {
    let tokens = Lexer::new().lex("a b+c").unwrap();
    assert_eq!(texts(&tokens), vec!["a b+c"]);
}

proptest! {
    #[test]
    fn word_spans_slice_back_to_their_text(words in prop::collection::vec("[a-z0-9_$.]{1,8}", 1..8)) {
        let source = words.join(" + ");
        let tokens = LexerCollection::default_expression().lex(&source).unwrap();
        for token in &tokens {
            prop_assert_eq!(&source[token.span.start..token.span.end], token.text.as_str());
        }
        let operands: Vec<&str> = tokens
            .iter()
            .filter(|t| !t.text.chars().all(is_operator_char))
            .map(|t| t.text.as_str())
            .collect();
        prop_assert_eq!(operands, words.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
