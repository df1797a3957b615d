//! Result and Error types for actnet-njoy

// standard library
use std::path::PathBuf;

/// Type alias for `Result<T, njoy::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `actnet-njoy` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    GendfError(#[from] actnet_gendf::Error),

    #[error("unknown element \"{0}\"")]
    UnknownElement(String),

    #[error("njoy failed for {isotope}: {message}")]
    NjoyFailed { isotope: String, message: String },

    #[error("njoy did not write the expected tape {0}")]
    MissingTape(PathBuf),
}
