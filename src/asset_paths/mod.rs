//! Helpers for matching asset modules and shaping the paths they are referenced by.
//!
//! Filtering decides which module ids the plugin owns; the prefix helpers turn
//! configured public and asset paths into the leading part of a reference.

mod bundle;
mod filters;

pub use bundle::{import_path_prefix, public_path_prefix, relative_slash_path};
pub use filters::ModuleFilter;
