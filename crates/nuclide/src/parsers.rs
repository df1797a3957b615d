//! Nuclide names as written in activation and decay libraries

// internal modules
use crate::nuclide::{IsomerState, Nuclide};

// actnet crates
use actnet_utils::StringExt;

// nom parser combinators
use nom::branch::alt;
use nom::character::complete::{one_of, satisfy};
use nom::combinator::{all_consuming, map, opt, recognize, value, verify};
use nom::sequence::{pair, preceded};
use nom::IResult;

/// A complete nuclide name, with nothing left over
///
/// `<symbol>[-|_]<A><state>`, where the state is any of
///     - nothing, or `g`, for the ground state
///     - `m1`, `m2`, ... for the ENSDF levels (`m0` is the ground state)
///     - `m`, `n`, `o` for the first three isomers, as FISPACT and ALARA
///       write them
///     - `*` for the first isomer
///
/// A bare symbol (`Fe`) is accepted with a mass number of 0.
pub(crate) fn parse_nuclide(i: &str) -> IResult<&str, Nuclide> {
    all_consuming(map(
        pair(symbol, opt(preceded(opt(one_of("-_")), pair(mass_number, state)))),
        |(symbol, mass)| {
            let (isotope, state) = mass.unwrap_or_default();
            Nuclide {
                symbol: symbol.to_lowercase().capitalise(),
                isotope,
                state,
            }
        },
    ))(i)
}

/// One or two letters, in any case
fn symbol(i: &str) -> IResult<&str, &str> {
    recognize(pair(letter, opt(letter)))(i)
}

fn letter(i: &str) -> IResult<&str, char> {
    satisfy(|c: char| c.is_ascii_alphabetic())(i)
}

/// Mass number, never zero
fn mass_number(i: &str) -> IResult<&str, u16> {
    verify(nom::character::complete::u16, |a| *a > 0)(i)
}

fn state(i: &str) -> IResult<&str, IsomerState> {
    map(opt(alt((ensdf_level, library_letter))), Option::unwrap_or_default)(i)
}

/// `m` followed by the level number
fn ensdf_level(i: &str) -> IResult<&str, IsomerState> {
    map(preceded(one_of("mM"), nom::character::complete::u8), |level| match level {
        0 => IsomerState::Ground,
        n => IsomerState::Excited(n),
    })(i)
}

/// Single letter isomer tags
fn library_letter(i: &str) -> IResult<&str, IsomerState> {
    alt((
        value(IsomerState::Ground, one_of("gG")),
        value(IsomerState::Excited(1), one_of("mM*")),
        value(IsomerState::Excited(2), one_of("nN")),
        value(IsomerState::Excited(3), one_of("oO")),
    ))(i)
}
