//! Labels: the callable units produced by preprocessing.

use rustc_hash::FxHashMap;
use std::rc::Rc;

use wisp_lexer::Token;

/// One statement line of a label body.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    /// 1-based line in the preprocessed source.
    pub line: usize,
    /// Exact source slice of the statement.
    pub text: String,
    /// `text` split by the expression lexer; spans are relative to `text`.
    pub tokens: Vec<Token>,
}

/// A named, parameterized block of statements.
///
/// Immutable once preprocessing has produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub name: String,
    pub params: Vec<String>,
    pub statements: Vec<Statement>,
    /// Line of the `@name[...]` declaration.
    pub line: usize,
}

impl Label {
    /// Line relative to the declaration (the declaration line is 1).
    pub fn to_local_line(&self, global: usize) -> Option<usize> {
        global.checked_sub(self.line).map(|offset| offset + 1)
    }

    pub fn to_global_line(&self, local: usize) -> Option<usize> {
        local.checked_sub(1).map(|offset| self.line + offset)
    }
}

pub type LabelTable = FxHashMap<String, Rc<Label>>;
