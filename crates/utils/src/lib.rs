//! Common utility for extended `std` types
//!
//! These are left public for convenience.
//!
//! For example, capitalising an element symbol or joining emission signatures
//! are needed by most of the actnet crates.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod option_ext;
mod string_ext;

// Flatten
pub use option_ext::OptionExt;
pub use string_ext::StringExt;
