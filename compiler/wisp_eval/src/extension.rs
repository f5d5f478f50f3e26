//! The extension contract.
//!
//! An extension is a bundle of registrations baked into a live registry.
//! Baking only adds: builtins and macros replace entries of the same name,
//! operator overloads and probes are appended after existing ones.

use crate::registry::{Builtin, Operator, Probe, RawBuiltin};

pub trait Extension {
    fn name(&self) -> &str;

    fn builtins(&self) -> Vec<(String, Builtin)>;

    fn raw_builtins(&self) -> Vec<(String, RawBuiltin)> {
        Vec::new()
    }

    /// Operator overloads keyed by token.
    fn operators(&self) -> Vec<(String, Operator)>;

    /// `(find, replace)` text macros.
    fn macros(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Literal probes, appended after the registry's existing probes.
    fn probes(&self) -> Vec<Probe> {
        Vec::new()
    }
}

/// Entry point of an extension module: builds its descriptor.
pub type ExtensionFactory = fn() -> Box<dyn Extension>;
