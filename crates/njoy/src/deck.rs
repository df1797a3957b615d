//! NJOY input decks

// internal modules
use crate::error::{Error, Result};

// actnet modules
use actnet_nuclide::atomic_number;
use actnet_utils::f;

/// ENDF tape unit, MODER output and the input for every later module
pub(crate) const NENDF: u32 = 21;
/// Final PENDF tape unit written by GASPR and read by GROUPR
pub(crate) const NPEND: u32 = 25;
/// Groupwise output tape unit
pub(crate) const NGOUT2: u32 = 31;
/// Raw evaluated data tape unit for MODER
pub(crate) const NIN_MODER: u32 = 20;

/// VITAMIN-J 175 group neutron structure
const IGN: u32 = 17;
/// VITAMIN-E weight function
const IWT: u32 = 11;
/// File number for cross sections in the reaction list
const MFD: u32 = 3;

/// Type of NJOY run an input deck is written for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunType {
    /// MODER, RECONR, BROADR, UNRESR and GASPR to produce a PENDF tape
    #[default]
    Prep,
    /// GROUPR conversion of ENDF/PENDF tapes to a groupwise GENDF tape
    Groupr,
}

/// Substitute material specific values into an NJOY input deck
///
/// The `mass` is a string because isomeric targets carry a trailing `m`.
/// Each reaction is a pair of the MT number and the description written on
/// the GROUPR reaction cards.
///
/// ```rust
/// # use actnet_njoy::{fill_input_template, RunType};
/// let deck = fill_input_template(
///     2631,
///     &[(16, "(z,2n)"), (102, "(z,g)")],
///     "Fe",
///     "56",
///     293.6,
///     RunType::Groupr,
/// )
/// .unwrap();
///
/// assert!(deck.contains(" 2631 17 0 11 0 1 1 1/"));
/// assert!(deck.contains(" \"26-Fe-56 for TENDL 2017\"/"));
/// assert!(deck.contains(" 3 16 \"(z,2n)\" /"));
/// ```
pub fn fill_input_template(
    material_id: u32,
    reactions: &[(u16, &str)],
    element: &str,
    mass: &str,
    temperature: f64,
    run_type: RunType,
) -> Result<String> {
    let z = atomic_number(element).ok_or_else(|| Error::UnknownElement(element.to_string()))?;

    let deck = match run_type {
        RunType::Prep => prep_deck(material_id, element, mass, temperature),
        RunType::Groupr => {
            let title = f!("\"{z:02}-{element}-{mass} for TENDL 2017\"");
            groupr_deck(material_id, &title, reactions, temperature)
        }
    };

    Ok(deck)
}

/// PENDF preparation sequence
fn prep_deck(material_id: u32, element: &str, mass: &str, temperature: f64) -> String {
    let lines = [
        f!("moder"),
        f!(" {NIN_MODER} {NENDF}/"),
        f!("reconr"),
        f!(" {NENDF} 22/"),
        f!(" 'neutron PENDF for {element}-{mass} of TENDL-2017'"),
        f!(" {material_id}/"),
        f!(" 0.001/"),
        f!(" 0/"),
        f!("broadr"),
        f!(" {NENDF} 22 23/"),
        f!(" {material_id} 1/"),
        f!(" 0.001/"),
        f!(" {temperature}/"),
        f!(" 0/"),
        f!("unresr"),
        f!(" {NENDF} 23 24/"),
        f!(" {material_id} 1 1 0/"),
        f!(" {temperature}/"),
        f!(" 1.0e10/"),
        f!(" 0/"),
        f!("gaspr"),
        f!(" {NENDF} 24 {NPEND}/"),
        f!("stop"),
    ];

    lines.join("\n") + "\n"
}

/// Group conversion with the VITAMIN-J structure
fn groupr_deck(
    material_id: u32,
    title: &str,
    reactions: &[(u16, &str)],
    temperature: f64,
) -> String {
    let mut lines = vec![
        f!("groupr/"),
        f!(" {NENDF} {NPEND} 0 {NGOUT2}/"),
        f!(" {material_id} {IGN} 0 {IWT} 0 1 1 1/"),
        f!(" {title}/"),
        f!(" {temperature}"),
        f!(" 0/"),
    ];

    lines.extend(
        reactions
            .iter()
            .map(|(mt, description)| f!(" {MFD} {mt} \"{description}\" /")),
    );

    lines.extend([f!(" 0/"), f!(" 0/"), f!("stop")]);
    lines.join("\n") + "\n"
}
