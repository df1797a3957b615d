//! Light gas production bookkeeping
//!
//! Gas production totals (MT 203-207) already include every individual
//! reaction that emits the gas. The assembler records each of those
//! individual contributions under the gas daughter as well, so one of two
//! strategies is needed to avoid counting them twice:
//!
//! - [GasPolicy::Remove] trusts the total and drops the individual entries
//! - [GasPolicy::Subtract] keeps the individual entries and reduces the
//!   total to the residual that is not assigned to any of them

// internal modules
use crate::network::{DaughterKey, ReactionKey, ReactionNetwork};

// actnet modules
use actnet_nuclide::Kza;

// external crates
use log::{debug, warn};

/// Light gas nuclides with a production total
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Gas {
    Proton,
    Deuteron,
    Triton,
    Helion,
    Alpha,
}

/// Gas total reference table, `(gas, KZA, aggregate MT)`
pub const GAS_TOTALS: [(Gas, Kza, u16); 5] = [
    (Gas::Proton, Kza::from_raw(10010), 203),
    (Gas::Deuteron, Kza::from_raw(10020), 204),
    (Gas::Triton, Kza::from_raw(10030), 205),
    (Gas::Helion, Kza::from_raw(20030), 206),
    (Gas::Alpha, Kza::from_raw(20040), 207),
];

impl Gas {
    /// KZA of the gas nuclide
    ///
    /// ```rust
    /// # use actnet_network::Gas;
    /// assert_eq!(Gas::Alpha.kza().value(), 20040);
    /// assert_eq!(Gas::Helion.kza().value(), 20030);
    /// ```
    pub fn kza(&self) -> Kza {
        GAS_TOTALS[self.index()].1
    }

    /// MT of the aggregate production total
    ///
    /// ```rust
    /// # use actnet_network::Gas;
    /// assert_eq!(Gas::Proton.total_mt(), 203);
    /// assert_eq!(Gas::Alpha.total_mt(), 207);
    /// ```
    pub fn total_mt(&self) -> u16 {
        GAS_TOTALS[self.index()].2
    }

    /// Short tag, e.g. `p` or `α`
    pub fn symbol(&self) -> &'static str {
        match self {
            Gas::Proton => "p",
            Gas::Deuteron => "d",
            Gas::Triton => "t",
            Gas::Helion => "3He",
            Gas::Alpha => "α",
        }
    }

    fn index(&self) -> usize {
        match self {
            Gas::Proton => 0,
            Gas::Deuteron => 1,
            Gas::Triton => 2,
            Gas::Helion => 3,
            Gas::Alpha => 4,
        }
    }
}

impl std::fmt::Display for Gas {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Strategy for reconciling gas totals with individual pathways
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GasPolicy {
    /// Keep only the aggregate total
    Remove,
    /// Reduce the aggregate total by every individual pathway
    #[default]
    Subtract,
}

/// Remove double counted gas production from the whole network
///
/// Only gas daughters that hold both the aggregate total and at least one
/// individual pathway are touched. Subtraction is not clamped, so a
/// negative residual in the data is kept and reported with a warning.
pub fn disambiguate_gas(network: &mut ReactionNetwork, policy: GasPolicy) {
    for (parent, daughters) in network.parents_mut() {
        for (gas, kza, total_mt) in GAS_TOTALS {
            let Some(reactions) = daughters.get_mut(&DaughterKey::Nuclide(kza)) else {
                continue;
            };

            let total_key = ReactionKey::Mt(total_mt);
            if !reactions.contains_key(&total_key) || reactions.len() < 2 {
                continue;
            }

            match policy {
                GasPolicy::Remove => {
                    debug!(
                        "{parent}: keeping only MT{total_mt} for {gas}, {} pathways removed",
                        reactions.len() - 1
                    );
                    reactions.retain(|key, _| *key == total_key);
                }
                GasPolicy::Subtract => {
                    let pathways: Vec<Vec<f64>> = reactions
                        .iter()
                        .filter(|(key, _)| **key != total_key)
                        .map(|(_, entry)| entry.cross_sections.clone())
                        .collect();

                    if let Some(total) = reactions.get_mut(&total_key) {
                        for pathway in &pathways {
                            total
                                .cross_sections
                                .iter_mut()
                                .zip(pathway)
                                .for_each(|(t, p)| *t -= p);
                        }

                        if total.cross_sections.iter().any(|v| *v < 0.0) {
                            warn!("{parent}: negative {gas} residual after subtraction");
                        }
                    }

                    debug!(
                        "{parent}: subtracted {} pathways from MT{total_mt}",
                        pathways.len()
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::ReactionEntry;

    fn network() -> ReactionNetwork {
        let parent = Kza::from_raw(260560);
        let alpha = DaughterKey::Nuclide(Kza::from_raw(20040));
        let mut network = ReactionNetwork::new(3);
        network.accumulate(
            parent,
            alpha,
            ReactionKey::Mt(207),
            ReactionEntry::new("x", vec![1.0, 2.0, 3.0]),
        );
        network.accumulate(
            parent,
            alpha,
            ReactionKey::Mt(22),
            ReactionEntry::new("nα", vec![0.5, 0.5, 0.5]),
        );
        network.accumulate(
            parent,
            alpha,
            ReactionKey::Mt(107),
            ReactionEntry::new("α", vec![0.25, 0.0, 1.0]),
        );
        network
    }

    #[test]
    fn remove_keeps_total() {
        let mut network = network();
        disambiguate_gas(&mut network, GasPolicy::Remove);

        let reactions = network
            .reactions(Kza::from_raw(260560), DaughterKey::Nuclide(Kza::from_raw(20040)))
            .unwrap();
        assert_eq!(reactions.len(), 1);
        assert_eq!(
            reactions[&ReactionKey::Mt(207)].cross_sections,
            vec![1.0, 2.0, 3.0]
        );
    }

    #[test]
    fn subtract_leaves_residual() {
        let mut network = network();
        disambiguate_gas(&mut network, GasPolicy::Subtract);

        let reactions = network
            .reactions(Kza::from_raw(260560), DaughterKey::Nuclide(Kza::from_raw(20040)))
            .unwrap();
        assert_eq!(reactions.len(), 3);
        assert_eq!(
            reactions[&ReactionKey::Mt(207)].cross_sections,
            vec![0.25, 1.5, 1.5]
        );
    }

    #[test]
    fn total_alone_untouched() {
        let parent = Kza::from_raw(260560);
        let proton = DaughterKey::Nuclide(Kza::from_raw(10010));
        let mut network = ReactionNetwork::new(2);
        network.accumulate(
            parent,
            proton,
            ReactionKey::Mt(203),
            ReactionEntry::new("x", vec![1.0, 1.0]),
        );

        let before = network.clone();
        disambiguate_gas(&mut network, GasPolicy::Subtract);
        assert_eq!(network, before);
        disambiguate_gas(&mut network, GasPolicy::Remove);
        assert_eq!(network, before);
    }

    #[test]
    fn pathways_without_total_untouched() {
        let parent = Kza::from_raw(260560);
        let proton = DaughterKey::Nuclide(Kza::from_raw(10010));
        let mut network = ReactionNetwork::new(1);
        network.accumulate(
            parent,
            proton,
            ReactionKey::Mt(103),
            ReactionEntry::new("p", vec![1.0]),
        );
        network.accumulate(
            parent,
            proton,
            ReactionKey::Mt(28),
            ReactionEntry::new("np", vec![2.0]),
        );

        let before = network.clone();
        disambiguate_gas(&mut network, GasPolicy::Remove);
        assert_eq!(network, before);
    }

    #[test]
    fn reference_table() {
        assert_eq!(Gas::Proton.kza().value(), 10010);
        assert_eq!(Gas::Deuteron.total_mt(), 204);
        assert_eq!(Gas::Triton.kza().value(), 10030);
        assert_eq!(Gas::Helion.total_mt(), 206);
        assert_eq!(Gas::Alpha.to_string(), "α");
    }
}
