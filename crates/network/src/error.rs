//! Result and Error types for actnet-network

// actnet modules
use actnet_nuclide::Kza;

/// Type alias for `Result<T, network::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `actnet-network` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed to read csv")]
    CsvError(#[from] csv::Error),

    #[error(transparent)]
    NuclideError(#[from] actnet_nuclide::Error),

    #[cfg(feature = "gendf")]
    #[error(transparent)]
    GendfError(#[from] actnet_gendf::Error),

    /// Empty or malformed reaction taxonomy, always fatal
    #[error("invalid reaction table: {0}")]
    TableError(String),

    #[error("parser failed: {0}")]
    ParseError(String),

    #[error("no cross sections for MT{mt} of {parent}")]
    SectionNotFound { parent: Kza, mt: u16 },

    #[error("MT{mt} has {found} groups, expected at most {expected}")]
    TooManyGroups {
        mt: u16,
        expected: usize,
        found: usize,
    },

    #[error("failed to write progress bar")]
    ProgressError(String),
}
