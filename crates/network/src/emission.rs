//! Emitted particle accounting
//!
//! An emission signature such as `2n`, `np`, `nα` or `n3He` is tokenised once
//! into `(multiplicity, particle)` terms followed by an optional trailing
//! isomer level, e.g. `n1` is a neutron leaving the residual in its first
//! excited level.

// internal modules
use crate::gas::Gas;

// actnet modules
use actnet_utils::f;

// external crates
use log::trace;

// nom parser combinators
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha0, char, one_of};
use nom::combinator::{all_consuming, map, opt, value};
use nom::multi::many1;
use nom::sequence::{pair, preceded, tuple};
use nom::IResult;

/// Substrings marking a reaction that has no single residual nucleus
pub const SPECIAL_TOKENS: [&str; 11] = [
    "total", "z0", "nonelas.", "anything", "contin.", "fission", "f", "RES", "X", "disap",
    "abs",
];

/// Light particles that may be emitted by a reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Particle {
    Neutron,
    Proton,
    Deuteron,
    Triton,
    Helion,
    Alpha,
    Gamma,
}

impl Particle {
    /// Change in (neutrons, protons) of the residual nucleus per particle
    ///
    /// ```rust
    /// # use actnet_network::Particle;
    /// assert_eq!(Particle::Neutron.nucleons(), (-1, 0));
    /// assert_eq!(Particle::Alpha.nucleons(), (-2, -2));
    /// assert_eq!(Particle::Gamma.nucleons(), (0, 0));
    /// ```
    pub fn nucleons(&self) -> (i32, i32) {
        match self {
            Particle::Neutron => (-1, 0),
            Particle::Proton => (0, -1),
            Particle::Deuteron => (-1, -1),
            Particle::Triton => (-2, -1),
            Particle::Helion => (-1, -2),
            Particle::Alpha => (-2, -2),
            Particle::Gamma => (0, 0),
        }
    }

    /// Light gas nuclide for charged particles
    pub fn gas(&self) -> Option<Gas> {
        match self {
            Particle::Proton => Some(Gas::Proton),
            Particle::Deuteron => Some(Gas::Deuteron),
            Particle::Triton => Some(Gas::Triton),
            Particle::Helion => Some(Gas::Helion),
            Particle::Alpha => Some(Gas::Alpha),
            Particle::Neutron | Particle::Gamma => None,
        }
    }
}

/// Multiplicity of a single particle type in a signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    pub count: u32,
    pub particle: Particle,
}

/// Classified emission signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// Ordinary reaction with a single residual nucleus
    Particles { terms: Vec<Term>, level: u32 },
    /// Aggregate production of a light gas, `X` followed by the particle
    GasTotal(Gas),
    /// Totals, fission, and anything else without a single residual
    Unquantifiable,
}

impl Emission {
    /// Classify an emission signature
    ///
    /// ```rust
    /// # use actnet_network::{Emission, Gas, Particle, Term};
    /// assert_eq!(
    ///     Emission::parse("2n"),
    ///     Emission::Particles {
    ///         terms: vec![Term { count: 2, particle: Particle::Neutron }],
    ///         level: 0
    ///     }
    /// );
    /// assert_eq!(Emission::parse("Xα"), Emission::GasTotal(Gas::Alpha));
    /// assert_eq!(Emission::parse("fission"), Emission::Unquantifiable);
    /// ```
    pub fn parse(signature: &str) -> Self {
        let signature = signature.trim();

        if let Ok((_, gas)) = gas_total(signature) {
            return Emission::GasTotal(gas);
        }

        if SPECIAL_TOKENS.iter().any(|s| signature.contains(s)) {
            return Emission::Unquantifiable;
        }

        match signature_terms(signature) {
            Ok((_, (terms, level))) => Emission::Particles { terms, level },
            Err(_) => {
                trace!("Unable to tokenise \"{signature}\"");
                Emission::Unquantifiable
            }
        }
    }

    /// True unless the signature is unquantifiable
    pub fn is_quantifiable(&self) -> bool {
        !matches!(self, Emission::Unquantifiable)
    }

    /// Trailing isomer level, zero for anything but ordinary reactions
    pub fn level(&self) -> u32 {
        match self {
            Emission::Particles { level, .. } => *level,
            _ => 0,
        }
    }

    /// Net change in (neutrons, protons) including the absorbed neutron
    ///
    /// Only ordinary reactions have a nucleon change.
    ///
    /// ```rust
    /// # use actnet_network::Emission;
    /// assert_eq!(Emission::parse("np").nucleon_change(), Some((0, -1)));
    /// assert_eq!(Emission::parse("2n").nucleon_change(), Some((-1, 0)));
    /// assert_eq!(Emission::parse("Xp").nucleon_change(), None);
    /// ```
    pub fn nucleon_change(&self) -> Option<(i32, i32)> {
        match self {
            Emission::Particles { terms, .. } => {
                let (n, p) = terms.iter().fold((1, 0), |(n, p), term| {
                    let (dn, dp) = term.particle.nucleons();
                    (n + term.count as i32 * dn, p + term.count as i32 * dp)
                });
                Some((n, p))
            }
            _ => None,
        }
    }

    /// Change in `(Z, A)` from the target to the residual nucleus
    pub fn za_change(&self) -> Option<(i32, i32)> {
        self.nucleon_change().map(|(n, p)| (p, n + p))
    }

    /// Change in KZA, `(ΔP * 1000 + ΔP + ΔN) * 10 + M`
    ///
    /// ```rust
    /// # use actnet_network::Emission;
    /// assert_eq!(Emission::parse("2n").del_kza(), Some(-10));
    /// assert_eq!(Emission::parse("np").del_kza(), Some(-10010));
    /// assert_eq!(Emission::parse("n1").del_kza(), Some(1));
    /// ```
    pub fn del_kza(&self) -> Option<i64> {
        let (n, p) = self.nucleon_change()?;
        let (n, p) = (n as i64, p as i64);
        Some((p * 1000 + p + n) * 10 + self.level() as i64)
    }

    /// Number of each light gas nuclide emitted
    ///
    /// ```rust
    /// # use actnet_network::{Emission, Gas};
    /// assert_eq!(Emission::parse("n2α").gas_counts(), vec![(Gas::Alpha, 2)]);
    /// assert_eq!(
    ///     Emission::parse("pα").gas_counts(),
    ///     vec![(Gas::Proton, 1), (Gas::Alpha, 1)]
    /// );
    /// ```
    pub fn gas_counts(&self) -> Vec<(Gas, u32)> {
        let mut counts: Vec<(Gas, u32)> = Vec::new();
        if let Emission::Particles { terms, .. } = self {
            for term in terms {
                let Some(gas) = term.particle.gas() else {
                    continue;
                };
                match counts.iter_mut().find(|(g, _)| *g == gas) {
                    Some((_, count)) => *count += term.count,
                    None => counts.push((gas, term.count)),
                }
            }
        }
        counts
    }
}

/// Signature with any trailing isomer digits removed
///
/// ```rust
/// # use actnet_network::strip_level;
/// assert_eq!(strip_level("n12"), "n");
/// assert_eq!(strip_level("2n0"), "2n");
/// assert_eq!(strip_level("np"), "np");
/// ```
pub fn strip_level(signature: &str) -> &str {
    signature.trim_end_matches(|c: char| c.is_ascii_digit())
}

/// Readable form of a list of terms, mostly for log messages
pub fn describe(terms: &[Term]) -> String {
    terms
        .iter()
        .map(|t| f!("{}x{:?}", t.count, t.particle))
        .collect::<Vec<String>>()
        .join(" ")
}

// ! Parser combinators

/// A single particle symbol
///
/// `3He` is tried before anything else so that it is never read as three
/// of something.
fn particle(i: &str) -> IResult<&str, Particle> {
    alt((
        value(Particle::Helion, tag("3He")),
        value(Particle::Neutron, char('n')),
        value(Particle::Proton, char('p')),
        value(Particle::Deuteron, char('d')),
        value(Particle::Triton, char('t')),
        value(Particle::Helion, char('h')),
        value(Particle::Alpha, one_of("aα")),
        value(Particle::Gamma, one_of("gγ")),
    ))(i)
}

/// Optional multiplicity and a particle, e.g. `2n`, `α`, `3He`
fn term(i: &str) -> IResult<&str, Term> {
    alt((
        map(tag("3He"), |_| Term {
            count: 1,
            particle: Particle::Helion,
        }),
        map(
            pair(opt(nom::character::complete::u32), particle),
            |(count, particle)| Term {
                count: count.unwrap_or(1),
                particle,
            },
        ),
    ))(i)
}

/// Full signature, terms then level, with trailing qualifiers such as the
/// `c` of continuum reactions ignored
fn signature_terms(i: &str) -> IResult<&str, (Vec<Term>, u32)> {
    let (i, (terms, level, _)) = all_consuming(tuple((
        many1(term),
        opt(nom::character::complete::u32),
        alpha0,
    )))(i)?;
    Ok((i, (terms, level.unwrap_or(0))))
}

/// Gas production total, `X` followed by a charged particle
fn gas_total(i: &str) -> IResult<&str, Gas> {
    let (rest, particle) = all_consuming(preceded(char('X'), particle))(i)?;
    match particle.gas() {
        Some(gas) => Ok((rest, gas)),
        None => Err(nom::Err::Error(nom::error::Error::new(
            i,
            nom::error::ErrorKind::Verify,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("n", (0, 0))]
    #[case("2n", (-1, 0))]
    #[case("3n", (-2, 0))]
    #[case("γ", (1, 0))]
    #[case("g", (1, 0))]
    #[case("p", (1, -1))]
    #[case("d", (0, -1))]
    #[case("t", (-1, -1))]
    #[case("3He", (0, -2))]
    #[case("h", (0, -2))]
    #[case("α", (-1, -2))]
    #[case("a", (-1, -2))]
    #[case("np", (0, -1))]
    #[case("nα", (-2, -2))]
    #[case("2nα", (-3, -2))]
    #[case("n3α", (-6, -6))]
    #[case("n3He", (-1, -2))]
    #[case("npα", (-2, -3))]
    #[case("2α", (-3, -4))]
    #[case("pd", (0, -2))]
    fn nucleon_accounting(#[case] signature: &str, #[case] expected: (i32, i32)) {
        assert_eq!(
            Emission::parse(signature).nucleon_change(),
            Some(expected),
            "signature {signature}"
        );
    }

    #[rstest]
    #[case("n1", 1)]
    #[case("n9", 9)]
    #[case("n10", 10)]
    #[case("n40", 40)]
    #[case("2n0", 0)]
    #[case("p3", 3)]
    #[case("3He2", 2)]
    #[case("nc", 0)]
    fn trailing_levels(#[case] signature: &str, #[case] level: u32) {
        let emission = Emission::parse(signature);
        assert!(emission.is_quantifiable());
        assert_eq!(emission.level(), level);
    }

    #[test]
    fn continuum_qualifier() {
        assert_eq!(
            Emission::parse("αc"),
            Emission::Particles {
                terms: vec![Term {
                    count: 1,
                    particle: Particle::Alpha
                }],
                level: 0
            }
        );
    }

    #[rstest]
    #[case("total")]
    #[case("z0")]
    #[case("nonelas.")]
    #[case("anything")]
    #[case("contin.")]
    #[case("fission")]
    #[case("nf")]
    #[case("2nf")]
    #[case("RES")]
    #[case("Xn")]
    #[case("Xγ")]
    #[case("disap")]
    #[case("abs")]
    #[case("")]
    #[case("?")]
    fn unquantifiable(#[case] signature: &str) {
        assert_eq!(Emission::parse(signature), Emission::Unquantifiable);
        assert_eq!(Emission::parse(signature).del_kza(), None);
    }

    #[rstest]
    #[case("Xp", Gas::Proton)]
    #[case("Xd", Gas::Deuteron)]
    #[case("Xt", Gas::Triton)]
    #[case("X3He", Gas::Helion)]
    #[case("Xα", Gas::Alpha)]
    #[case("Xa", Gas::Alpha)]
    fn gas_totals(#[case] signature: &str, #[case] gas: Gas) {
        assert_eq!(Emission::parse(signature), Emission::GasTotal(gas));
    }

    #[test]
    fn helion_before_multiplicity() {
        let Emission::Particles { terms, .. } = Emission::parse("n3He") else {
            panic!("n3He should be an ordinary reaction");
        };
        assert_eq!(describe(&terms), "1xNeutron 1xHelion");
    }

    #[test]
    fn del_kza_includes_level() {
        // (n,p) to the first excited level
        assert_eq!(Emission::parse("p1").del_kza(), Some(-9999));
        assert_eq!(Emission::parse("α").del_kza(), Some(-20030));
    }

    #[test]
    fn gas_counts_accumulate() {
        assert_eq!(
            Emission::parse("pαp").gas_counts(),
            vec![(Gas::Proton, 2), (Gas::Alpha, 1)]
        );
        assert!(Emission::parse("2n").gas_counts().is_empty());
        assert!(Emission::parse("Xα").gas_counts().is_empty());
    }
}
