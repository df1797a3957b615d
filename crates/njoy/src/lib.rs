//! NJOY GROUPR input decks, execution, and file discovery
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod deck;
mod discovery;
mod error;
mod markers;
mod runner;

#[doc(inline)]
pub use deck::{fill_input_template, RunType};

#[doc(inline)]
pub use discovery::{search_for_files, split_isotope, IsotopeFiles};

#[doc(inline)]
pub use markers::{ensure_gendf_markers, insert_markers};

#[doc(inline)]
pub use runner::Njoy;

#[doc(inline)]
pub use error::{Error, Result};
