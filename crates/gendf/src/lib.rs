//! Reader for groupwise GENDF cross section tapes
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod parsers;
mod record;
mod tape;

#[doc(inline)]
pub use tape::Tape;

#[doc(inline)]
pub use record::control_columns;

#[doc(inline)]
pub use error::{Error, Result};
