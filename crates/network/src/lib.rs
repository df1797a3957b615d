//! Activation reaction network builder
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod amalgamate;
mod assemble;
mod batch;
mod emission;
mod error;
mod failures;
mod gas;
mod isomer;
mod network;
mod radionuclides;
mod taxonomy;
mod writer;

#[doc(inline)]
pub use emission::{describe, strip_level, Emission, Particle, Term, SPECIAL_TOKENS};

#[doc(inline)]
pub use taxonomy::{is_excited_state_specific, Descriptor, Taxonomy};

#[doc(inline)]
pub use radionuclides::Radionuclides;

#[doc(inline)]
pub use isomer::{Decision, Fallback, IsomerPolicy};

#[doc(inline)]
pub use network::{DaughterKey, Daughters, ReactionEntry, ReactionKey, ReactionNetwork, Reactions};

#[doc(inline)]
pub use assemble::{assemble, CrossSectionSource, InMemorySource};

#[doc(inline)]
pub use gas::{disambiguate_gas, Gas, GasPolicy, GAS_TOTALS};

#[doc(inline)]
pub use amalgamate::amalgamate;

#[doc(inline)]
pub use writer::{format_value, network_to_writer, write_network};

#[doc(inline)]
pub use failures::{Failure, FailureLog};

#[doc(inline)]
pub use batch::{run_batch, Batch, Options};

#[cfg(feature = "gendf")]
#[doc(inline)]
pub use batch::run_gendf_batch;

#[doc(inline)]
pub use error::{Error, Result};
