//! Wisp Ext - sample extensions.
//!
//! Each extension is a type implementing [`wisp_eval::Extension`] plus a
//! factory function with the [`ExtensionFactory`] signature, so hosts can
//! either bake the value directly or pick factories by name:
//!
//! ```
//! use wisp_eval::{silent_handler, Interpreter};
//! use wisp_value::Variable;
//!
//! let mut interp = Interpreter::builder().print_handler(silent_handler()).build();
//! let factory = wisp_ext::factory("list").unwrap();
//! assert!(interp.bake_factory(factory).is_ok());
//! assert_eq!(interp.expression("len([1, 2] + [3])").value_or(0), Variable::from(3));
//! ```

mod list;
mod reference;

pub use list::{list_extension, List, ListExtension};
pub use reference::{reference_extension, Reference, ReferenceExtension};

use wisp_eval::ExtensionFactory;

/// Names accepted by [`factory`].
pub const EXTENSION_NAMES: [&str; 2] = [ListExtension::NAME, ReferenceExtension::NAME];

/// Factory of the sample extension called `name`.
pub fn factory(name: &str) -> Option<ExtensionFactory> {
    match name {
        ListExtension::NAME => Some(list_extension),
        ReferenceExtension::NAME => Some(reference_extension),
        _ => None,
    }
}
