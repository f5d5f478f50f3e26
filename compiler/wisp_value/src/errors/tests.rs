use super::*;
use pretty_assertions::assert_eq;

#[test]
fn categories_follow_variants() {
    assert_eq!(unknown_operator("<>").category(), ErrorCategory::Parse);
    assert_eq!(undefined_variable("x").category(), ErrorCategory::Binding);
    assert_eq!(arity_mismatch("f", 1, 2).category(), ErrorCategory::Binding);
    assert_eq!(type_mismatch("Number", "String").category(), ErrorCategory::Type);
    assert_eq!(ScriptError::UnbalancedEndif.category(), ErrorCategory::Control);
    assert_eq!(
        ScriptError::custom(ErrorCategory::Type, "nope").category(),
        ErrorCategory::Type
    );
}

#[test]
fn located_wraps_once() {
    let err = undefined_variable("y").located("main", 3);
    assert_eq!(err.to_string(), "line 3 in @main: undefined variable `$y`");
    assert_eq!(err.line(), Some(3));
    assert_eq!(err.category(), ErrorCategory::Binding);

    let again = err.clone().located("caller", 9);
    assert_eq!(again, err);
    assert_eq!(again.root(), &undefined_variable("y"));
}

#[test]
fn raw_errors_are_never_located() {
    let err = ScriptError::raw("custom failure").located("main", 1);
    assert_eq!(err.to_string(), "custom failure");
    assert_eq!(err.line(), None);
}

#[test]
fn arity_message_pluralizes() {
    assert_eq!(
        arity_mismatch("add", 2, 1).to_string(),
        "`add` expects 2 arguments, got 1"
    );
    assert_eq!(
        arity_mismatch("neg", 1, 0).to_string(),
        "`neg` expects 1 argument, got 0"
    );
}

#[test]
fn lex_errors_convert() {
    let err: ScriptError = wisp_lexer::LexError::UnterminatedString { line: 4 }.into();
    assert_eq!(err.category(), ErrorCategory::Parse);
    assert_eq!(
        err.to_string(),
        "unterminated string literal starting on line 4"
    );
}
