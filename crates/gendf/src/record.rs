//! Fixed width ENDF-6 records

// internal modules
use crate::error::{Error, Result};
use crate::parsers::{endf_f64, endf_int};

// actnet modules
use actnet_utils::f;

/// Width of a single data field
const FIELD_WIDTH: usize = 11;

/// Number of data fields on a line
const FIELD_COUNT: usize = 6;

/// A single 80 column line of an ENDF-6 formatted tape
///
/// Columns 1-66 hold six 11 character data fields, followed by the material
/// number (67-70), file number (71-72), section number (73-75) and an
/// optional sequence number that is ignored.
///
/// Fields are only interpreted on request, since the same columns hold
/// floats, integers, or text depending on the record type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Record<'a> {
    text: &'a str,
    pub mat: i32,
    pub mf: u8,
    pub mt: u16,
}

impl<'a> Record<'a> {
    /// Split out the control columns of a line
    pub fn parse(line: &'a str) -> Result<Self> {
        if !line.is_ascii() {
            return Err(Error::ParseError(f!("non-ascii record \"{line}\"")));
        }

        let mat = control(line, 66..70)?;
        let mf = control(line, 70..72)?;
        let mt = control(line, 72..75)?;

        Ok(Self {
            text: line,
            mat: mat as i32,
            mf: u8::try_from(mf).map_err(|_| Error::ParseError(f!("invalid MF {mf}")))?,
            mt: u16::try_from(mt).map_err(|_| Error::ParseError(f!("invalid MT {mt}")))?,
        })
    }

    /// Field `n` (0-5) as a float, blank fields are zero
    pub fn float(&self, n: usize) -> Result<f64> {
        let text = self.field(n).trim();
        if text.is_empty() {
            return Ok(0.0);
        }
        endf_f64(text)
            .map(|(_, value)| value)
            .map_err(|_| Error::ParseError(f!("\"{text}\" is not a valid float")))
    }

    /// Field `n` (0-5) as an integer, blank fields are zero
    pub fn int(&self, n: usize) -> Result<i64> {
        let text = self.field(n).trim();
        if text.is_empty() {
            return Ok(0);
        }
        endf_int(text)
            .map(|(_, value)| value)
            .map_err(|_| Error::ParseError(f!("\"{text}\" is not a valid integer")))
    }

    /// Up to six floats from a LIST data line
    pub fn floats(&self, count: usize) -> Result<Vec<f64>> {
        (0..count.min(FIELD_COUNT)).map(|n| self.float(n)).collect()
    }

    fn field(&self, n: usize) -> &'a str {
        let start = n * FIELD_WIDTH;
        column(self.text, start..start + FIELD_WIDTH)
    }
}

/// MAT, MF and MT control columns of an ENDF-6 line
///
/// ```rust
/// # use actnet_gendf::control_columns;
/// let send = format!("{:66}2631 3  099999", "");
/// assert_eq!(control_columns(&send).unwrap(), (2631, 3, 0));
/// ```
pub fn control_columns(line: &str) -> Result<(i32, u8, u16)> {
    let record = Record::parse(line)?;
    Ok((record.mat, record.mf, record.mt))
}

/// MF and MT of a line whose data fields can not be read
///
/// Columns are counted in characters, so stray non-ascii text in the data
/// fields does not move the control columns.
pub(crate) fn section_of(line: &str) -> Option<(u8, u16)> {
    let control: String = line.chars().skip(66).take(9).collect();
    let (_, mf, mt) = control_columns(&f!("{:66}{control}", "")).ok()?;
    Some((mf, mt))
}

/// Slice a column range, tolerating lines with trailing whitespace trimmed
fn column(line: &str, range: std::ops::Range<usize>) -> &str {
    let end = range.end.min(line.len());
    if range.start >= end {
        ""
    } else {
        &line[range.start..end]
    }
}

/// Integer control column, where blank means zero
fn control(line: &str, range: std::ops::Range<usize>) -> Result<i64> {
    let text = column(line, range).trim();
    if text.is_empty() {
        return Ok(0);
    }
    endf_int(text)
        .map(|(_, value)| value)
        .map_err(|_| Error::ParseError(f!("invalid control column \"{text}\"")))
}
