//! Record of everything skipped during a run

// internal modules
use crate::error::Result;

// actnet modules
use actnet_utils::OptionExt;

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A skipped isotope, or a skipped reaction of an isotope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Isotope name or file the failure belongs to
    pub isotope: String,
    /// Reaction code, `None` when the whole isotope failed
    pub mt: Option<u16>,
    /// Reason for skipping
    pub reason: String,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<12} {:>5} {}", self.isotope, self.mt.display(), self.reason)
    }
}

/// Every failure of a batch, in the order they happened
///
/// ```rust
/// # use actnet_network::FailureLog;
/// let mut log = FailureLog::default();
/// log.record("Fe56", Some(16), "section not found");
/// log.record("Pu239", None, "njoy failed");
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.for_isotope("Fe56").count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureLog {
    failures: Vec<Failure>,
}

impl FailureLog {
    pub fn record<S: Into<String>, R: Into<String>>(
        &mut self,
        isotope: S,
        mt: Option<u16>,
        reason: R,
    ) {
        self.failures.push(Failure {
            isotope: isotope.into(),
            mt,
            reason: reason.into(),
        });
    }

    /// Append another log
    pub fn extend(&mut self, other: FailureLog) {
        self.failures.extend(other.failures);
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Failure> {
        self.failures.iter()
    }

    /// Failures recorded against one isotope
    pub fn for_isotope<'a>(&'a self, isotope: &'a str) -> impl Iterator<Item = &'a Failure> {
        self.failures.iter().filter(move |f| f.isotope == isotope)
    }

    /// Isotopes that failed completely
    pub fn failed_isotopes(&self) -> impl Iterator<Item = &str> {
        self.failures
            .iter()
            .filter(|f| f.mt.is_none())
            .map(|f| f.isotope.as_str())
    }

    /// Write one failure per line
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        for failure in &self.failures {
            writeln!(writer, "{failure}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_output() {
        let mut log = FailureLog::default();
        log.record("Fe56", Some(16), "no section");
        log.record("U235", None, "njoy failed");

        let mut buffer = Vec::new();
        log.to_writer(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Fe56            16 no section");
        assert_eq!(lines[1], "U235          none njoy failed");
        assert_eq!(log.failed_isotopes().collect::<Vec<&str>>(), vec!["U235"]);
    }

    #[test]
    fn extend() {
        let mut a = FailureLog::default();
        a.record("Fe56", Some(16), "a");
        let mut b = FailureLog::default();
        b.record("Fe54", Some(102), "b");
        a.extend(b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.iter().last().unwrap().isotope, "Fe54");
    }
}
