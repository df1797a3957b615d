//! Nuclides with independent decay data

// internal modules
use crate::error::Result;

// actnet modules
use actnet_nuclide::Kza;

// standard library
use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

// external crates
use log::debug;

/// Set of nuclides known to the decay library
///
/// Isomeric daughters are only kept as separate nuclides when they appear in
/// this set. The text form is any whitespace separated list where every
/// token is either a packed KZA or a nuclide name.
///
/// ```rust
/// # use actnet_network::Radionuclides;
/// # use actnet_nuclide::Kza;
/// # use std::str::FromStr;
/// let set = Radionuclides::from_str("270600 Co60m1\nAg110m").unwrap();
/// assert_eq!(set.len(), 3);
/// assert!(set.contains(Kza::from_raw(270601)));
/// assert!(set.contains(Kza::from_raw(471101)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Radionuclides(BTreeSet<Kza>);

impl Radionuclides {
    /// Read a radionuclide list from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let set = Self::from_str(&std::fs::read_to_string(path)?)?;
        debug!("Read {} radionuclides from {}", set.len(), path.display());
        Ok(set)
    }

    pub fn contains(&self, kza: Kza) -> bool {
        self.0.contains(&kza)
    }

    pub fn insert(&mut self, kza: Kza) -> bool {
        self.0.insert(kza)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Kza> {
        self.0.iter()
    }
}

impl FromStr for Radionuclides {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        s.split_whitespace()
            .map(|token| Ok(Kza::from_str(token)?))
            .collect()
    }
}

impl FromIterator<Kza> for Radionuclides {
    fn from_iter<I: IntoIterator<Item = Kza>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn mixed_tokens() {
        let set = Radionuclides::from_str("10030\n  Fe55 Co60m\tAg-110m ").unwrap();
        assert_eq!(
            set.iter().map(|k| k.value()).collect::<Vec<u32>>(),
            vec![10030, 260550, 270601, 471101]
        );
    }

    #[test]
    fn invalid_token() {
        assert!(Radionuclides::from_str("260550 notanuclide").is_err());
        assert!(Radionuclides::from_str("260559 2600").is_err());
    }

    #[test]
    fn empty() {
        assert!(Radionuclides::from_str("").unwrap().is_empty());
    }

    #[test]
    fn from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "260550\n270601").unwrap();
        let set = Radionuclides::from_file(file.path()).unwrap();
        assert!(set.contains(Kza::from_raw(260550)));
        assert!(!set.contains(Kza::from_raw(270600)));
    }
}
