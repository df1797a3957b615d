//! Groupwise tape reader

// internal modules
use crate::error::{Error, Result};
use crate::parsers::title_nuclide;
use crate::record::{section_of, Record};

// actnet modules
use actnet_nuclide::{atomic_number, Kza};
use actnet_utils::f;

// standard library
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// external crates
use log::{debug, trace, warn};

/// File number holding the reaction cross sections
const MF_CROSS_SECTIONS: u8 = 3;

/// Upper bound on NGN, well above the largest NJOY group structures
const MAX_GROUPS: i64 = 100_000;

/// Cross section data for a single material on a GENDF tape
///
/// Only the MF3 sections are kept. Every line is stored as raw text and only
/// interpreted when the cross sections of a reaction are requested, so that
/// one malformed section never prevents the others from being used.
/// Unreadable lines outside of MF3 are skipped with a warning. Only a line
/// with unreadable control columns fails the whole tape.
///
/// ```rust
/// # use actnet_gendf::Tape;
/// let tape = Tape::from_file("data/fe56.gendf").unwrap();
///
/// assert_eq!(tape.material_id(), 2631);
/// assert_eq!(tape.parent_kza().unwrap().value(), 260560);
/// assert_eq!(tape.reaction_codes(), &[16, 102, 203]);
///
/// // Highest energy group first
/// assert_eq!(tape.cross_sections(16).unwrap(), vec![0.5, 1.5, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tape {
    /// Text of the tape identification record
    title: String,
    /// ENDF material number, MAT
    material_id: u32,
    /// MF3 reaction codes in the order they appear on the tape
    reaction_codes: Vec<u16>,
    /// Raw lines of every MF3 section, keyed by MT
    sections: HashMap<u16, Vec<String>>,
}

impl Tape {
    /// Read a GENDF tape from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading GENDF tape {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read a GENDF tape from any buffered reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();

        let title = match lines.next() {
            Some(line) => {
                let line = line?;
                line.get(0..66).unwrap_or(line.as_str()).trim().to_string()
            }
            None => return Err(Error::EmptyTape),
        };

        let mut tape = Self {
            title,
            ..Default::default()
        };
        let mut material_id: Option<u32> = None;

        for line in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record = match Record::parse(&line) {
                Ok(record) => record,
                Err(e) => match section_of(&line) {
                    // left for the section to fail on when it is read
                    Some((MF_CROSS_SECTIONS, mt)) if mt > 0 => {
                        warn!("Unreadable line in MF3/MT{mt}: {e}");
                        tape.push_line(mt, line.clone());
                        continue;
                    }
                    Some((mf, mt)) => {
                        warn!("Skipping unreadable line in MF{mf}/MT{mt}: {e}");
                        continue;
                    }
                    None => return Err(e),
                },
            };

            if record.mat <= 0 {
                continue;
            }

            match material_id {
                None => material_id = Some(record.mat as u32),
                Some(mat) if mat != record.mat as u32 => {
                    warn!(
                        "Only the first material is read, MAT {} ignored",
                        record.mat
                    );
                    continue;
                }
                _ => (),
            }

            // MT=0 marks the end of a section
            if record.mf != MF_CROSS_SECTIONS || record.mt == 0 {
                continue;
            }

            let mt = record.mt;
            tape.push_line(mt, line);
        }

        tape.material_id = material_id.ok_or(Error::NoMaterial)?;
        Ok(tape)
    }

    fn push_line(&mut self, mt: u16, line: String) {
        if !self.sections.contains_key(&mt) {
            trace!("Found section MF3/MT{mt}");
            self.reaction_codes.push(mt);
        }
        self.sections.entry(mt).or_default().push(line);
    }

    /// Tape identification text from the first line
    pub fn title(&self) -> &str {
        &self.title
    }

    /// ENDF material number of the tape
    pub fn material_id(&self) -> u32 {
        self.material_id
    }

    /// All MF3 reaction codes, in tape order
    pub fn reaction_codes(&self) -> &[u16] {
        &self.reaction_codes
    }

    /// Parent nuclide from the `Z-Sym-A[m|n]` tape title
    ///
    /// An `m` suffix on the mass number is the first isomer, and `n` the
    /// second.
    pub fn parent_kza(&self) -> Result<Kza> {
        let (_, (z, symbol, a, m)) = title_nuclide(&self.title)
            .map_err(|_| Error::UnknownParent(self.title.clone()))?;

        match atomic_number(symbol) {
            Some(expected) if expected != z => warn!(
                "Title atomic number {z} does not match element {symbol}, using {z}"
            ),
            None => warn!("Unknown element \"{symbol}\" in title, using Z={z}"),
            _ => (),
        }

        Ok(Kza::new(z, a, m)?)
    }

    /// Number of energy groups, taken from the first MF3 section
    pub fn group_count(&self) -> Option<usize> {
        let mt = self.reaction_codes.first()?;
        let head = self.sections.get(mt)?.first()?;
        let record = Record::parse(head).ok()?;
        usize::try_from(record.int(5).ok()?).ok()
    }

    /// Group-wise cross sections for a reaction, highest energy group first
    ///
    /// The section is a HEAD record (NL, NZ, and the group count NGN) followed
    /// by one LIST record per group, with NW values in field 5 and the group
    /// index IG in field 6. The list holds NL*NZ flux values before the
    /// cross section. Groups that are not written are zero.
    pub fn cross_sections(&self, mt: u16) -> Result<Vec<f64>> {
        let lines = self.sections.get(&mt).ok_or(Error::SectionNotFound {
            mat: self.material_id,
            mt,
        })?;

        let malformed = |reason: String| Error::MalformedSection { mt, reason };

        let mut records = lines.iter().map(|l| Record::parse(l));

        let head = records
            .next()
            .ok_or_else(|| malformed("missing HEAD record".into()))??;
        let nl = head.int(2)?;
        let nz = head.int(3)?;
        let ngn = head.int(5)?;

        if ngn < 1 || nl < 1 || nz < 1 {
            return Err(malformed(f!("NL={nl}, NZ={nz}, NGN={ngn}")));
        }

        if ngn > MAX_GROUPS {
            return Err(malformed(f!("NGN={ngn} is more than {MAX_GROUPS} groups")));
        }

        let flux_values = (nl * nz) as usize;
        let mut sigma = vec![0.0; ngn as usize];

        while let Some(list) = records.next() {
            let list = list?;
            let nw = list.int(4)?;
            let ig = list.int(5)?;

            if nw < 1 {
                return Err(malformed(f!("NW={nw} for group {ig}")));
            }

            if ig < 1 || ig > ngn {
                return Err(malformed(f!("group {ig} outside of 1-{ngn}")));
            }

            // collect the NW values spread over the following lines
            let nw = nw as usize;
            let mut values = Vec::with_capacity(nw);
            while values.len() < nw {
                let data = records
                    .next()
                    .ok_or_else(|| malformed(f!("list for group {ig} ended early")))??;
                values.extend(data.floats(nw - values.len())?);
            }

            sigma[ig as usize - 1] = *values
                .get(flux_values)
                .ok_or_else(|| malformed(f!("no cross section for group {ig}")))?;
        }

        sigma.reverse();
        Ok(sigma)
    }
}
