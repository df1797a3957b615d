//! Write operations for the reaction network

// internal modules
use crate::error::Result;
use crate::network::ReactionNetwork;

// actnet modules
use actnet_utils::f;

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// external crates
use itertools::Itertools;
use log::debug;

/// Write a [ReactionNetwork] to the whitespace delimited text format
///
/// The first line is the number of energy groups, followed by one line per
/// pathway and a closing `-1`:
///
/// ```text
/// 175
/// 260560 260550 2n 0 0 1.5 0 ...
/// 260560 250560 p 1.2e-5 ...
/// -1
/// ```
///
/// Pathways with no cross section in any group are left out. Lines are
/// ordered by parent, daughter, then reaction so that the same network
/// always produces the same file.
///
/// ```no_run
/// # use actnet_network::{write_network, ReactionNetwork};
/// let network = ReactionNetwork::new(175);
/// write_network(&network, "./network.txt").unwrap();
/// ```
pub fn write_network<P: AsRef<Path>>(network: &ReactionNetwork, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = init_writer(path)?;
    let written = network_to_writer(network, &mut writer)?;
    writer.flush()?;

    debug!("Wrote {written} pathways to {}", path.display());
    Ok(())
}

/// Same as [write_network()] for any writer, returning the number of
/// pathway lines written
pub fn network_to_writer<W: Write>(network: &ReactionNetwork, writer: &mut W) -> Result<usize> {
    writeln!(writer, "{}", network.group_count())?;

    let mut written = 0;
    for (parent, daughter, _, entry) in network.iter() {
        if entry.total() == 0.0 {
            continue;
        }

        let values = entry
            .cross_sections
            .iter()
            .map(|v| format_value(*v))
            .join(" ");

        writeln!(writer, "{parent} {daughter} {} {values}", entry.emission)?;
        written += 1;
    }

    writeln!(writer, "-1")?;
    Ok(written)
}

/// Shortest round trip text for a cross section
///
/// ```rust
/// # use actnet_network::format_value;
/// assert_eq!(format_value(0.0), "0");
/// assert_eq!(format_value(1.5), "1.5");
/// assert_eq!(format_value(2e-4), "0.0002");
/// assert_eq!(format_value(1.5e-7), "1.5e-7");
/// assert_eq!(format_value(3e15), "3e15");
/// ```
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 {
        "0".to_string()
    } else if (1e-4..1e15).contains(&magnitude) {
        f!("{value}")
    } else {
        f!("{value:e}")
    }
}

fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}
