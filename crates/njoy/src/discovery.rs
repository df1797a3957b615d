//! Discovery of evaluated data files

// internal modules
use crate::error::Result;

// actnet modules
use actnet_nuclide::{Kza, Nuclide};
use actnet_utils::f;

// standard library
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// external crates
use log::{debug, warn};

/// Extensions recognised for evaluated data, in order of preference
const ENDF_EXTENSIONS: [&str; 2] = ["tendl", "endf"];

/// Matching pair of ENDF and PENDF files for one isotope
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct IsotopeFiles {
    /// Element symbol as written in the file name
    pub element: String,
    /// Mass number, including any trailing isomer tag e.g. `116m`
    pub mass: String,
    /// Path to the evaluated data
    pub endf: PathBuf,
    /// Path to the pointwise data with the same stem
    pub pendf: PathBuf,
}

impl IsotopeFiles {
    /// Name of the isotope, `<element><mass>`
    pub fn name(&self) -> String {
        f!("{}{}", self.element, self.mass)
    }

    /// Target nuclide of the files
    ///
    /// ```rust
    /// # use actnet_njoy::IsotopeFiles;
    /// let files = IsotopeFiles {
    ///     element: "Ag".into(),
    ///     mass: "116m".into(),
    ///     endf: "Ag116m.tendl".into(),
    ///     pendf: "Ag116m.pendf".into(),
    /// };
    /// assert_eq!(files.kza().unwrap().value(), 471161);
    /// ```
    pub fn kza(&self) -> Option<Kza> {
        Nuclide::from_str(&self.name()).ok()?.kza().ok()
    }
}

/// Split a file stem into the element symbol and mass number
///
/// Everything before the first digit is the element. Returns `None` if either
/// part is missing.
///
/// ```rust
/// # use actnet_njoy::split_isotope;
/// assert_eq!(split_isotope("Fe56"), Some(("Fe", "56")));
/// assert_eq!(split_isotope("Ag116m"), Some(("Ag", "116m")));
/// assert_eq!(split_isotope("readme"), None);
/// ```
pub fn split_isotope(stem: &str) -> Option<(&str, &str)> {
    let i = stem.find(|c: char| c.is_ascii_digit())?;
    if i == 0 {
        return None;
    }
    Some(stem.split_at(i))
}

/// Find every ENDF file in a directory with a matching PENDF file
///
/// Files named `<element><A>.tendl` or `<element><A>.endf` are paired with
/// `<element><A>.pendf` in the same directory. When both a `.tendl` and an
/// `.endf` file exist for an isotope the `.tendl` file is used.
///
/// Results are sorted by isotope name.
pub fn search_for_files<P: AsRef<Path>>(dir: P) -> Result<Vec<IsotopeFiles>> {
    let dir = dir.as_ref();
    let mut found: BTreeMap<String, IsotopeFiles> = BTreeMap::new();

    for extension in ENDF_EXTENSIONS {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();

            if path.extension().and_then(|e| e.to_str()) != Some(extension) {
                continue;
            }

            let pendf = path.with_extension("pendf");
            if !pendf.is_file() {
                debug!("No PENDF file for {}", path.display());
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let Some((element, mass)) = split_isotope(stem) else {
                warn!("Unable to infer isotope from {}", path.display());
                continue;
            };

            found
                .entry(stem.to_string())
                .or_insert_with(|| IsotopeFiles {
                    element: element.to_string(),
                    mass: mass.to_string(),
                    endf: path.clone(),
                    pendf,
                });
        }
    }

    Ok(found.into_values().collect())
}
