//! Packed KZA nuclide identifier

// standard library
use std::str::FromStr;

// internal modules
use crate::element::symbol;
use crate::error::{Error, Result};
use crate::nuclide::{IsomerState, Nuclide};

/// Packed nuclide identifier `(Z * 1000 + A) * 10 + M`
///
/// Every component is recovered by integer division and modulo:
///
/// ```rust
/// # use actnet_nuclide::Kza;
/// let kza = Kza::new(47, 110, 1).unwrap();
/// assert_eq!(kza.value(), 471101);
/// assert_eq!(kza.decode(), (47, 110, 1));
/// ```
///
/// The constructor rejects anything that can not be packed without
/// ambiguity. Most importantly an isomer level above 9 would silently turn
/// into a different mass number.
///
/// ```rust
/// # use actnet_nuclide::{Kza, Error};
/// assert_eq!(Kza::new(26, 56, 10), Err(Error::IsomerOutOfRange(10)));
/// assert_eq!(Kza::new(0, 1, 0), Err(Error::InvalidAtomicNumber(0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Kza(u32);

impl Kza {
    /// Pack a nuclide from its atomic number, mass number and isomer level
    pub fn new(z: u32, a: u32, m: u32) -> Result<Self> {
        if !(1..=118).contains(&z) {
            return Err(Error::InvalidAtomicNumber(z));
        }
        if !(1..=999).contains(&a) {
            return Err(Error::InvalidMassNumber(a));
        }
        if m > 9 {
            return Err(Error::IsomerOutOfRange(m));
        }
        Ok(Self((z * 1000 + a) * 10 + m))
    }

    /// Wrap an already packed value without any checks
    ///
    /// Mostly useful for constants such as the light gas nuclides.
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// The packed integer value
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Atomic number, Z
    pub fn z(&self) -> u32 {
        self.0 / 10_000
    }

    /// Mass number, A
    pub fn a(&self) -> u32 {
        (self.0 / 10) % 1000
    }

    /// Isomeric excitation level, M
    pub fn m(&self) -> u32 {
        self.0 % 10
    }

    /// Unpack into `(Z, A, M)`
    pub fn decode(&self) -> (u32, u32, u32) {
        (self.z(), self.a(), self.m())
    }

    /// True for M = 0
    pub fn is_ground(&self) -> bool {
        self.m() == 0
    }

    /// Same nuclide in the ground state
    ///
    /// ```rust
    /// # use actnet_nuclide::Kza;
    /// assert_eq!(Kza::from_raw(471101).ground(), Kza::from_raw(471100));
    /// ```
    pub fn ground(&self) -> Self {
        Self(self.0 - self.m())
    }

    /// Same Z and A in the requested isomer level
    ///
    /// ```rust
    /// # use actnet_nuclide::{Kza, Error};
    /// let kza = Kza::from_raw(260550);
    /// assert_eq!(kza.with_isomer(2), Ok(Kza::from_raw(260552)));
    /// assert_eq!(kza.with_isomer(12), Err(Error::IsomerOutOfRange(12)));
    /// ```
    pub fn with_isomer(&self, m: u32) -> Result<Self> {
        if m > 9 {
            return Err(Error::IsomerOutOfRange(m));
        }
        Ok(Self(self.ground().0 + m))
    }

    /// Ground state nuclide after changing Z and A
    ///
    /// Returns `None` if the result is not a nuclide, for example removing
    /// more protons than the nucleus has.
    ///
    /// ```rust
    /// # use actnet_nuclide::Kza;
    /// let fe56 = Kza::from_raw(260560);
    /// // (n,p) leaves Mn-56
    /// assert_eq!(fe56.shift(-1, 0), Some(Kza::from_raw(250560)));
    /// // (n,2n) leaves Fe-55
    /// assert_eq!(fe56.shift(0, -1), Some(Kza::from_raw(260550)));
    /// // nonsense
    /// assert_eq!(fe56.shift(-30, 0), None);
    /// ```
    pub fn shift(&self, delta_z: i32, delta_a: i32) -> Option<Self> {
        let z = u32::try_from(self.z() as i64 + delta_z as i64).ok()?;
        let a = u32::try_from(self.a() as i64 + delta_a as i64).ok()?;
        Self::new(z, a, 0).ok()
    }

    /// The [Nuclide] this identifier describes
    pub fn nuclide(&self) -> Nuclide {
        Nuclide {
            symbol: symbol(self.z()).unwrap_or("?").to_string(),
            isotope: self.a() as u16,
            state: match self.m() {
                0 => IsomerState::Ground,
                m => IsomerState::Excited(m as u8),
            },
        }
    }

    /// Readable name, e.g. `Fe56` or `Ag110m1`
    pub fn name(&self) -> String {
        self.nuclide().name()
    }
}

impl std::fmt::Display for Kza {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Kza {
    type Err = Error;

    /// Either the packed integer or any nuclide name [Nuclide] understands
    ///
    /// ```rust
    /// # use actnet_nuclide::Kza;
    /// # use std::str::FromStr;
    /// assert_eq!(Kza::from_str("270600").unwrap(), Kza::from_raw(270600));
    /// assert_eq!(Kza::from_str("Co60m").unwrap(), Kza::from_raw(270601));
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
            let value: u32 = s
                .parse()
                .map_err(|_| Error::ParseError(s.to_string()))?;
            let kza = Self(value);
            // re-pack to validate the components
            return Self::new(kza.z(), kza.a(), kza.m());
        }
        Nuclide::from_str(s)?.kza()
    }
}

impl TryFrom<Nuclide> for Kza {
    type Error = Error;

    fn try_from(nuclide: Nuclide) -> Result<Self> {
        nuclide.kza()
    }
}
