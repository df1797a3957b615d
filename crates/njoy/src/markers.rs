//! Repair of end markers missing from GROUPR output

// internal modules
use crate::error::Result;

// actnet modules
use actnet_gendf::control_columns;
use actnet_utils::f;

// standard library
use std::path::Path;

// external crates
use log::debug;

/// Insert the MF1 SEND and MF3 FEND records that GROUPR does not write
///
/// GROUPR output is readable without them, but strict ENDF-6 readers
/// expect every section to end with a SEND record (MT=0) and every file
/// with a FEND record (MF=0, MT=0).
///
/// - The MF1 SEND record goes after the last MF1/MT451 line
/// - The MF3 FEND record goes after the last MF3 SEND record
///
/// Nothing is inserted where the marker already exists, so this is safe to
/// call more than once.
pub fn ensure_gendf_markers<P: AsRef<Path>>(path: P, material_id: u32) -> Result<()> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let fixed = insert_markers(&text, material_id);

    if fixed != text {
        debug!("Inserted missing end records into {}", path.display());
        std::fs::write(path, fixed)?;
    }

    Ok(())
}

/// Text version of [ensure_gendf_markers()]
///
/// ```rust
/// # use actnet_njoy::insert_markers;
/// let tape = [
///     format!("{:66}2631 1451    1", ""),
///     format!("{:66}2631 3  099999", ""),
///     format!("{:66}   0 0  0    0", ""),
/// ]
/// .join("\n");
///
/// let fixed = insert_markers(&tape, 2631);
/// let lines: Vec<&str> = fixed.lines().collect();
/// assert_eq!(lines.len(), 5);
/// assert!(lines[1].ends_with("2631 1  099999"));
/// assert!(lines[3].ends_with("2631 0  0    0"));
/// ```
pub fn insert_markers(text: &str, material_id: u32) -> String {
    let mat = material_id as i32;
    let lines: Vec<&str> = text.lines().collect();

    let control: Vec<Option<(i32, u8, u16)>> =
        lines.iter().map(|l| control_columns(l).ok()).collect();

    let last_of = |target: (i32, u8, u16)| control.iter().rposition(|c| *c == Some(target));
    let next_is = |i: usize, target: (i32, u8, u16)| {
        control.get(i + 1).copied().flatten() == Some(target)
    };

    let blank = " ".repeat(66);
    let mut insertions: Vec<(usize, String)> = Vec::new();

    if let Some(i) = last_of((mat, 1, 451)) {
        if !next_is(i, (mat, 1, 0)) {
            insertions.push((i, f!("{blank}{material_id:>4} 1  099999")));
        }
    }

    if let Some(i) = last_of((mat, 3, 0)) {
        if !next_is(i, (mat, 0, 0)) {
            insertions.push((i, f!("{blank}{material_id:>4} 0  0    0")));
        }
    }

    let mut output: Vec<String> = Vec::with_capacity(lines.len() + insertions.len());
    for (i, line) in lines.iter().enumerate() {
        output.push(line.to_string());
        for (_, record) in insertions.iter().filter(|(at, _)| *at == i) {
            output.push(record.clone());
        }
    }

    let mut fixed = output.join("\n");
    if text.ends_with('\n') {
        fixed.push('\n');
    }
    fixed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mat: i32, mf: u8, mt: u16) -> String {
        format!("{:66}{mat:>4}{mf:>2}{mt:>3}", "")
    }

    #[test]
    fn markers_inserted() {
        let tape = [
            record(125, 1, 451),
            record(125, 1, 451),
            record(125, 3, 1),
            record(125, 3, 0),
            record(125, 3, 2),
            record(125, 3, 0),
            record(0, 0, 0),
            record(-1, 0, 0),
        ]
        .join("\n")
            + "\n";

        let fixed = insert_markers(&tape, 125);
        let controls: Vec<(i32, u8, u16)> = fixed
            .lines()
            .map(|l| control_columns(l).unwrap())
            .collect();

        assert_eq!(
            controls,
            vec![
                (125, 1, 451),
                (125, 1, 451),
                (125, 1, 0),
                (125, 3, 1),
                (125, 3, 0),
                (125, 3, 2),
                (125, 3, 0),
                (125, 0, 0),
                (0, 0, 0),
                (-1, 0, 0),
            ]
        );
        assert!(fixed.ends_with('\n'));
    }

    #[test]
    fn complete_tape_unchanged() {
        let tape = [
            record(125, 1, 451),
            record(125, 1, 0),
            record(125, 0, 0),
            record(125, 3, 1),
            record(125, 3, 0),
            record(125, 0, 0),
            record(0, 0, 0),
        ]
        .join("\n");

        assert_eq!(insert_markers(&tape, 125), tape);
    }

    #[test]
    fn idempotent() {
        let tape = [record(9228, 1, 451), record(9228, 3, 0)].join("\n");
        let once = insert_markers(&tape, 9228);
        assert_eq!(insert_markers(&once, 9228), once);
        assert_eq!(once.lines().count(), 4);
    }

    #[test]
    fn other_material_ignored() {
        let tape = [record(125, 1, 451), record(125, 3, 0)].join("\n");
        assert_eq!(insert_markers(&tape, 2631), tape);
    }
}
