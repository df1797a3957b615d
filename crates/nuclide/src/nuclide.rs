//! Common nuclide naming

// actnet crates
use actnet_utils::{f, StringExt};

// internal modules
use crate::element::atomic_number;
use crate::error::{Error, Result};
use crate::kza::Kza;
use crate::parsers::parse_nuclide;

/// Definition for a particular nuclide
///
/// `FromStr` accepts the names found in decay and activation libraries,
/// `<symbol>[-|_]<A><state>`:
///
/// - Element only Co, C
/// - Isotope Co60, Co-60, C12
/// - ENSDF levels Co60m1 Co60m2 ...
/// - Library tags Co60m Co60n Co60o, Ta180*
///
/// The whole name must be understood, so `Fe56q` is an error rather than
/// the ground state.
///
/// ```rust
/// # use actnet_nuclide::{Nuclide, IsomerState};
/// # use std::str::FromStr;
/// assert_eq!(
///     Nuclide::from_str("eu-152m2").unwrap(),
///     Nuclide {
///         symbol: "Eu".to_string(),
///         isotope: 152,
///         state: IsomerState::Excited(2)
///     }
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nuclide {
    /// Element
    pub symbol: String,
    /// Isotope number (Z+N, total nucleons)
    pub isotope: u16,
    /// Excited state status
    pub state: IsomerState,
}

impl Nuclide {
    /// A name for the nuclide with consistent formatting
    ///
    /// The nuclide name will be formatted as `<element><isotope number><state>`
    ///
    /// ```rust
    /// # use actnet_nuclide::{Nuclide, IsomerState};
    /// let mut nuclide = Nuclide {
    ///     symbol: "eu".to_string(),
    ///     isotope: 152,
    ///     state: IsomerState::Ground
    /// };
    /// assert_eq!(nuclide.name(), "Eu152");
    ///
    /// nuclide.state = IsomerState::Excited(1);
    /// assert_eq!(nuclide.name(), "Eu152m1");
    /// ```
    pub fn name(&self) -> String {
        // special case for elements
        let isotope = if self.isotope == 0 {
            "".to_string()
        } else {
            self.isotope.to_string()
        };

        f!("{}{}{}", self.symbol.capitalise(), isotope, self.state)
    }

    /// Convert to the packed KZA identifier
    ///
    /// Fails for element-only names, unknown symbols, and isomer levels
    /// above 9.
    ///
    /// ```rust
    /// # use actnet_nuclide::Nuclide;
    /// # use std::str::FromStr;
    /// let nuclide = Nuclide::from_str("Co60m1").unwrap();
    /// assert_eq!(nuclide.kza().unwrap().value(), 270601);
    /// assert!(Nuclide::from_str("Co").unwrap().kza().is_err());
    /// ```
    pub fn kza(&self) -> Result<Kza> {
        let z = atomic_number(&self.symbol)
            .ok_or_else(|| Error::UnknownElement(self.symbol.clone()))?;
        let m = match self.state {
            IsomerState::Ground => 0,
            IsomerState::Excited(e) => e as u32,
        };
        Kza::new(z, self.isotope as u32, m)
    }
}

impl std::str::FromStr for Nuclide {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, nuclide) = parse_nuclide(s.trim())
            .map_err(|_| Error::ParseError(f!("Could not extract values from {s}")))?;

        Ok(nuclide)
    }
}

impl std::fmt::Display for Nuclide {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Variants of excited states
///
/// A nuclide can either be in the ground state, or some excited state.
///
/// Excited state isomers use the ENSDF notation, where `m1` is the first
/// excited state, `m2` the second, and so on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IsomerState {
    #[default]
    Ground,
    Excited(u8),
}

impl std::fmt::Display for IsomerState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let state = match self {
            IsomerState::Ground => String::from(""),
            IsomerState::Excited(e) => f!("m{e}"),
        };
        write!(f, "{state}")
    }
}
