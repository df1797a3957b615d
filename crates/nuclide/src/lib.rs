//! KZA identifiers and nuclide names for activation data
//!
//! Activation libraries refer to every nuclide with a packed integer, the
//! KZA, defined as
//!
//! ```text
//! KZA = (Z * 1000 + A) * 10 + M
//! ```
//!
//! where `Z` is the atomic number, `A` the mass number, and `M` the isomeric
//! excitation level (0 for the ground state). Only a single digit is
//! available for `M`, so anything above 9 would bleed into the mass number
//! and is rejected.
//!
//! ## Quickstart example
//!
//! ```rust
//! # use actnet_nuclide::{Kza, Nuclide};
//! # use std::str::FromStr;
//! // Build a KZA directly from its components
//! let fe56 = Kza::new(26, 56, 0).unwrap();
//! assert_eq!(fe56.value(), 260560);
//!
//! // Or parse one from a common nuclide name
//! let ag110m = Nuclide::from_str("Ag110m1").unwrap().kza().unwrap();
//! assert_eq!(ag110m.value(), 471101);
//! assert_eq!(ag110m.name(), "Ag110m1");
//! ```
//!
//! The periodic table is a fixed lookup, see [atomic_number()] and
//! [symbol()].

// Modules
mod element;
mod error;
mod kza;
mod nuclide;
mod parsers;

// Re-exports of anything important with in-lined documentation for simplicity
#[doc(inline)]
pub use element::{atomic_number, symbol, ELEMENTS};

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use kza::Kza;

#[doc(inline)]
pub use nuclide::{IsomerState, Nuclide};
