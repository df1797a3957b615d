//! Result and Error types for the nuclide module

/// Type alias for `Result<T, nuclide::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug, PartialEq)]
/// The error type for `actnet-nuclide`
pub enum Error {
    /// Atomic number outside of the periodic table
    #[error("atomic number {0} outside of 1-118")]
    InvalidAtomicNumber(u32),

    /// Mass number that can not be packed into a KZA
    #[error("mass number {0} outside of 1-999")]
    InvalidMassNumber(u32),

    /// Isomer levels above 9 collide with the mass number digits
    #[error("isomer level {0} can not be represented in a KZA")]
    IsomerOutOfRange(u32),

    /// Symbol not found in the periodic table
    #[error("unknown element \"{0}\"")]
    UnknownElement(String),

    /// Generic error type for nom parser results
    #[error("parser failed: {0}")]
    ParseError(String),
}
