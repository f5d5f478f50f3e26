//! Variable scopes.
//!
//! A stack of scopes, one per active label call, on top of a global scope
//! that the host can write to. Scripts only ever see the innermost scope;
//! deeper scopes are reachable through [`ScopeRef`] handles.

use rustc_hash::FxHashMap;

use wisp_value::Variable;

/// Identity of one pushed scope. Never reused within an environment.
pub type ScopeId = u64;

/// Handle to a scope on the stack.
///
/// Holds the stack depth and the identity of the scope that lived there
/// when the handle was taken, so a handle outliving its scope resolves to
/// nothing instead of to a newer scope at the same depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeRef {
    pub depth: usize,
    pub id: ScopeId,
}

#[derive(Clone, Debug)]
struct Scope {
    id: ScopeId,
    bindings: FxHashMap<String, Variable>,
}

impl Scope {
    fn new(id: ScopeId) -> Self {
        Scope {
            id,
            bindings: FxHashMap::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
    next_id: ScopeId,
}

impl Environment {
    /// An environment holding only the global scope.
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::new(0)],
            next_id: 1,
        }
    }

    pub fn push_scope(&mut self) {
        let id = self.next_id;
        self.next_id += 1;
        self.scopes.push(Scope::new(id));
    }

    /// Pop the innermost scope. The global scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Number of scopes, the global one included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Handle to the innermost scope.
    pub fn current(&self) -> ScopeRef {
        let depth = self.scopes.len() - 1;
        ScopeRef {
            depth,
            id: self.scopes[depth].id,
        }
    }

    fn top(&self) -> &Scope {
        &self.scopes[self.scopes.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Bind `name` in the innermost scope, replacing any previous value.
    pub fn define(&mut self, name: impl Into<String>, value: Variable) {
        self.top_mut().bindings.insert(name.into(), value);
    }

    /// Bind `name` in the global scope.
    pub fn define_global(&mut self, name: impl Into<String>, value: Variable) {
        self.scopes[0].bindings.insert(name.into(), value);
    }

    /// Look `name` up in the innermost scope.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.top().bindings.get(name)
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.top_mut().bindings.get_mut(name)
    }

    /// Variable `name` in the scope `at` points to, if that scope is still live.
    pub fn resolve(&self, at: ScopeRef, name: &str) -> Option<&Variable> {
        self.scopes
            .get(at.depth)
            .filter(|scope| scope.id == at.id)
            .and_then(|scope| scope.bindings.get(name))
    }

    pub fn resolve_mut(&mut self, at: ScopeRef, name: &str) -> Option<&mut Variable> {
        self.scopes
            .get_mut(at.depth)
            .filter(|scope| scope.id == at.id)
            .and_then(|scope| scope.bindings.get_mut(name))
    }

    /// Names bound in the innermost scope, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.top().bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Drop every label scope, keeping the global one.
    pub fn unwind(&mut self) {
        self.scopes.truncate(1);
    }

    /// Drop every scope and every global binding.
    pub fn clear(&mut self) {
        self.scopes.truncate(1);
        self.scopes[0].bindings.clear();
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
