//! Library of parser functions for ENDF-6 text

// actnet modules
use actnet_utils::f;

// nom parser combinators
use nom::branch::alt;
use nom::character::complete::{alpha1, char, digit1, multispace0, one_of};
use nom::combinator::{all_consuming, map_parser, opt, recognize};
use nom::number::complete::double;
use nom::sequence::{preceded, tuple};
use nom::IResult;

/// Scientific number format e.g. -1.0e+03
fn scientific(i: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(one_of("-+")),
        digit1,
        opt(preceded(char('.'), opt(digit1))),
        one_of("Ee"),
        opt(one_of("-+")),
        digit1,
    )))(i)
}

/// Parse scientific numbers into an f64
fn scientific_as_f64(i: &str) -> IResult<&str, f64> {
    map_parser(scientific, double)(i)
}

/// Parse the compact ENDF float with the `E` dropped, e.g. `1.234567+5`
///
/// Fortran drops the exponent character to fit 11 columns, which breaks
/// every standard float parser.
pub(crate) fn endf_exponent_f64(i: &str) -> IResult<&str, f64> {
    let (i, value) = double(i)?;
    let (i, sign) = recognize(one_of("-+"))(i)?;
    let (i, exponent) = digit1(i)?;

    match f!("{value}e{sign}{exponent}").parse::<f64>() {
        Ok(number) => Ok((i, number)),
        Err(_) => Err(nom::Err::Error(nom::error::Error::new(
            i,
            nom::error::ErrorKind::Float,
        ))),
    }
}

/// Any float found in an ENDF-6 field
///
/// Handles the standard, compact, and plain integer forms.
pub(crate) fn endf_f64(i: &str) -> IResult<&str, f64> {
    all_consuming(alt((scientific_as_f64, endf_exponent_f64, double)))(i)
}

/// Signed integer found in an ENDF-6 field
pub(crate) fn endf_int(i: &str) -> IResult<&str, i64> {
    all_consuming(nom::character::complete::i64)(i)
}

/// Nuclide in a tape title, `Z-Sym-A` with an optional `m`/`n` isomer tag
///
/// NJOY titles may keep the quotes from the input deck and the atomic
/// number is usually zero padded, e.g. `'26-Fe-56 for TENDL 2017'` or
/// `02-He-003`.
pub(crate) fn title_nuclide(i: &str) -> IResult<&str, (u32, &str, u32, u32)> {
    let (i, _) = multispace0(i)?;
    let (i, _) = opt(one_of("'\""))(i)?;
    let (i, z) = nom::character::complete::u32(i)?;
    let (i, _) = char('-')(i)?;
    let (i, symbol) = alpha1(i)?;
    let (i, _) = char('-')(i)?;
    let (i, a) = nom::character::complete::u32(i)?;
    let (i, tag) = opt(one_of("mMnN"))(i)?;

    let m = match tag {
        Some('m') | Some('M') => 1,
        Some('n') | Some('N') => 2,
        _ => 0,
    };

    Ok((i, (z, symbol, a, m)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_floats() {
        assert_eq!(endf_f64("1.234567+5"), Ok(("", 123456.7)));
        assert_eq!(endf_f64("1.500000-1"), Ok(("", 0.15)));
        assert_eq!(endf_f64("-2.5-3"), Ok(("", -0.0025)));
        assert_eq!(endf_f64("+2.5+0"), Ok(("", 2.5)));
    }

    #[test]
    fn standard_floats() {
        assert_eq!(endf_f64("1.5E+02"), Ok(("", 150.0)));
        assert_eq!(endf_f64("2.0e-1"), Ok(("", 0.2)));
        assert_eq!(endf_f64("293.6"), Ok(("", 293.6)));
        assert_eq!(endf_f64("26056"), Ok(("", 26056.0)));
    }

    #[test]
    fn broken_floats() {
        assert!(endf_f64("1.0+").is_err());
        assert!(endf_f64("abc").is_err());
        assert!(endf_f64("1.0 2.0").is_err());
    }

    #[test]
    fn integers() {
        assert_eq!(endf_int("175"), Ok(("", 175)));
        assert_eq!(endf_int("-1"), Ok(("", -1)));
        assert!(endf_int("1.0").is_err());
    }

    #[test]
    fn titles() {
        assert_eq!(
            title_nuclide("26-Fe-56 for TENDL 2017"),
            Ok((" for TENDL 2017", (26, "Fe", 56, 0)))
        );
        assert_eq!(
            title_nuclide(" '47-Ag-116m for TENDL 2017'"),
            Ok((" for TENDL 2017'", (47, "Ag", 116, 1)))
        );
        assert_eq!(
            title_nuclide("47-Ag-116n"),
            Ok(("", (47, "Ag", 116, 2)))
        );
        assert_eq!(title_nuclide("02-He-003"), Ok(("", (2, "He", 3, 0))));
        assert!(title_nuclide("Fe-56").is_err());
    }
}
