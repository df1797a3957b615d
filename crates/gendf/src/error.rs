//! Result and Error types for actnet-gendf

/// Type alias for `Result<T, gendf::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `actnet-gendf` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    NuclideError(#[from] actnet_nuclide::Error),

    #[error("parser failed: {0}")]
    ParseError(String),

    #[error("tape is empty")]
    EmptyTape,

    #[error("tape contains no material records")]
    NoMaterial,

    #[error("failed to infer parent nuclide from title \"{0}\"")]
    UnknownParent(String),

    #[error("section MF3/MT{mt} not found for material {mat}")]
    SectionNotFound { mat: u32, mt: u16 },

    #[error("malformed section MF3/MT{mt}: {reason}")]
    MalformedSection { mt: u16, reason: String },
}
