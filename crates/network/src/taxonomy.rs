//! Reaction taxonomy, MT code to reaction description
//!
//! The table follows Table B.1 of the ENDF-6 manual. Each row is an MT code
//! and a description of the form `(z,<emission>)`, e.g. `(z,2n)` for the
//! (n,2n) reaction.

// internal modules
use crate::emission::{strip_level, Emission};
use crate::error::{Error, Result};
use crate::gas::Gas;

// actnet modules
use actnet_utils::f;

// standard library
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

// external crates
use log::{debug, trace};
use serde::Deserialize;

/// ENDF-6 reaction types shipped with the crate
const ENDF_TABLE: &str = include_str!("../data/mt_table.csv");

/// Raw row of the taxonomy CSV
#[derive(Debug, Deserialize)]
struct Row {
    #[serde(rename = "MT")]
    mt: String,
    #[serde(rename = "Reaction")]
    reaction: String,
}

/// Whether the level tag of an MT describes the residual directly
///
/// Reactions to a specific excited level (MT 50-91, 600-849, 875-891) name
/// the final level of the residual, so the excitation of the target does
/// not carry over.
///
/// ```rust
/// # use actnet_network::is_excited_state_specific;
/// assert!(is_excited_state_specific(51));
/// assert!(is_excited_state_specific(649));
/// assert!(!is_excited_state_specific(16));
/// assert!(!is_excited_state_specific(850));
/// ```
pub fn is_excited_state_specific(mt: u16) -> bool {
    matches!(mt, 50..=91 | 600..=849 | 875..=891)
}

/// Everything known about a single reaction type
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    /// ENDF reaction type number
    pub mt: u16,
    /// Description as given in the table, e.g. `(z,2n)`
    pub description: String,
    /// Classified emission
    pub emission: Emission,
    /// Emission tag used in the output, isomer digits removed and `x` for
    /// gas production totals
    pub signature: String,
    /// Isomeric level of the residual given by the reaction
    pub level: u32,
    /// Light gas for production totals
    pub gas: Option<Gas>,
}

impl Descriptor {
    /// Build a descriptor from a description of the form `(z,<emission>)`
    ///
    /// ```rust
    /// # use actnet_network::Descriptor;
    /// let d = Descriptor::new(51, "(z,n1)").unwrap();
    /// assert_eq!(d.signature, "n");
    /// assert_eq!(d.level, 1);
    /// assert_eq!(d.del_kza(), Some(1));
    ///
    /// let d = Descriptor::new(207, "(z,Xα)").unwrap();
    /// assert_eq!(d.signature, "x");
    /// assert!(d.gas.is_some());
    /// ```
    pub fn new(mt: u16, description: &str) -> Result<Self> {
        let emitted = description
            .trim()
            .strip_prefix('(')
            .and_then(|d| d.strip_suffix(')'))
            .and_then(|d| d.split_once(','))
            .map(|(_, emitted)| emitted.trim())
            .ok_or_else(|| Error::TableError(f!("MT{mt} description \"{description}\"")))?;

        let emission = Emission::parse(emitted);
        let (signature, gas) = match emission {
            Emission::GasTotal(gas) => ("x".to_string(), Some(gas)),
            _ => (strip_level(emitted).to_string(), None),
        };

        Ok(Self {
            mt,
            description: description.trim().to_string(),
            level: emission.level(),
            emission,
            signature,
            gas,
        })
    }

    /// True unless the reaction has no single residual nucleus
    pub fn is_quantifiable(&self) -> bool {
        self.emission.is_quantifiable()
    }

    /// True for the gas production totals
    pub fn is_gas_total(&self) -> bool {
        self.gas.is_some()
    }

    /// Change in KZA from target to residual
    pub fn del_kza(&self) -> Option<i64> {
        self.emission.del_kza()
    }
}

/// Lookup of reaction descriptors by MT
///
/// ```rust
/// # use actnet_network::Taxonomy;
/// let taxonomy = Taxonomy::endf().unwrap();
/// let nn = taxonomy.get(16).unwrap();
/// assert_eq!(nn.description, "(z,2n)");
/// assert_eq!(nn.del_kza(), Some(-10));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Taxonomy {
    descriptors: BTreeMap<u16, Descriptor>,
}

impl Taxonomy {
    /// Standard ENDF-6 reaction types
    pub fn endf() -> Result<Self> {
        Self::from_reader(ENDF_TABLE.as_bytes())
    }

    /// Read a taxonomy from a CSV file with `MT` and `Reaction` columns
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading reaction table {}", path.display());
        Self::from_reader(std::fs::File::open(path)?)
    }

    /// Read a taxonomy from any CSV source
    ///
    /// Empty tables, missing columns, and unparsable rows are all errors.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (i, record) in reader.deserialize::<Row>().enumerate() {
            let row = record.map_err(|e| Error::TableError(f!("row {}: {e}", i + 1)))?;
            let mt = row
                .mt
                .parse::<u16>()
                .map_err(|_| Error::TableError(f!("row {}: MT \"{}\"", i + 1, row.mt)))?;
            rows.push((mt, row.reaction));
        }

        Self::from_rows(rows)
    }

    /// Build a taxonomy from `(MT, description)` pairs
    pub fn from_rows<I, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u16, S)>,
        S: AsRef<str>,
    {
        let mut descriptors = BTreeMap::new();
        for (mt, description) in rows {
            let descriptor = Descriptor::new(mt, description.as_ref())?;
            trace!("MT{mt} {:?}", descriptor.emission);
            descriptors.insert(mt, descriptor);
        }

        if descriptors.is_empty() {
            return Err(Error::TableError("no reactions in table".into()));
        }

        Ok(Self { descriptors })
    }

    /// Descriptor for an MT, if known
    pub fn get(&self, mt: u16) -> Option<&Descriptor> {
        self.descriptors.get(&mt)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptors in ascending MT order
    pub fn iter(&self) -> impl Iterator<Item = &Descriptor> {
        self.descriptors.values()
    }

    /// `(MT, description)` pairs for the codes present in the table
    ///
    /// This is the reaction list handed to GROUPR, so codes without a
    /// description are dropped.
    pub fn groupr_reactions(&self, codes: &[u16]) -> Vec<(u16, &str)> {
        codes
            .iter()
            .filter_map(|mt| self.get(*mt))
            .map(|d| (d.mt, d.description.as_str()))
            .collect()
    }
}
