//! `actnet` builds activation reaction networks from groupwise nuclear data
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of the workspace crates
#[doc(inline)]
pub use actnet_network as network;

#[doc(inline)]
pub use actnet_nuclide as nuclide;

#[doc(inline)]
pub use actnet_utils as utils;

#[cfg(feature = "gendf")]
#[cfg_attr(docsrs, doc(cfg(feature = "gendf")))]
#[doc(inline)]
pub use actnet_gendf as gendf;

#[cfg(feature = "njoy")]
#[cfg_attr(docsrs, doc(cfg(feature = "njoy")))]
#[doc(inline)]
pub use actnet_njoy as njoy;
