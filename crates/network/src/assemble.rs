//! Assembly of the reaction network for one parent
//!
//! Every reaction code of a parent is classified with the [Taxonomy], given
//! a daughter, and summed into the [ReactionNetwork]. Anything that can not
//! be placed is skipped and recorded in the [FailureLog] without stopping
//! the rest of the parent.

// internal modules
use crate::error::{Error, Result};
use crate::failures::FailureLog;
use crate::isomer::{Decision, Fallback, IsomerPolicy};
use crate::network::{DaughterKey, ReactionEntry, ReactionKey, ReactionNetwork};
use crate::taxonomy::{is_excited_state_specific, Taxonomy};

// actnet modules
use actnet_nuclide::Kza;
use actnet_utils::f;

// standard library
use std::collections::{BTreeMap, BTreeSet};

// external crates
use log::{debug, trace, warn};

/// Anything that can provide groupwise cross sections for one parent
pub trait CrossSectionSource {
    /// Material identifier of the evaluation
    fn material_id(&self) -> u32;

    /// Target nuclide
    fn parent(&self) -> Result<Kza>;

    /// Reaction codes available, in file order
    fn reaction_codes(&self) -> Vec<u16>;

    /// Cross sections for a reaction, highest energy group first
    ///
    /// Fails with [Error::SectionNotFound] for a code with no data.
    fn cross_sections(&self, mt: u16) -> Result<Vec<f64>>;
}

#[cfg(feature = "gendf")]
impl CrossSectionSource for actnet_gendf::Tape {
    fn material_id(&self) -> u32 {
        actnet_gendf::Tape::material_id(self)
    }

    fn parent(&self) -> Result<Kza> {
        Ok(self.parent_kza()?)
    }

    fn reaction_codes(&self) -> Vec<u16> {
        actnet_gendf::Tape::reaction_codes(self).to_vec()
    }

    fn cross_sections(&self, mt: u16) -> Result<Vec<f64>> {
        actnet_gendf::Tape::cross_sections(self, mt).map_err(|e| match e {
            actnet_gendf::Error::SectionNotFound { mt, .. } => match self.parent_kza() {
                Ok(parent) => Error::SectionNotFound { parent, mt },
                Err(e) => e.into(),
            },
            e => e.into(),
        })
    }
}

/// Cross sections held in memory
///
/// ```rust
/// # use actnet_network::{CrossSectionSource, InMemorySource};
/// # use actnet_nuclide::Kza;
/// let source = InMemorySource::new(2631, Kza::from_raw(260560))
///     .with_section(16, vec![0.0, 1.5])
///     .with_section(102, vec![1e-3, 2e-3]);
///
/// assert_eq!(source.reaction_codes(), vec![16, 102]);
/// assert!(source.cross_sections(103).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InMemorySource {
    material_id: u32,
    parent: Kza,
    sections: BTreeMap<u16, Vec<f64>>,
}

impl InMemorySource {
    pub fn new(material_id: u32, parent: Kza) -> Self {
        Self {
            material_id,
            parent,
            sections: BTreeMap::new(),
        }
    }

    /// Add or replace the cross sections of a reaction
    pub fn with_section(mut self, mt: u16, cross_sections: Vec<f64>) -> Self {
        self.sections.insert(mt, cross_sections);
        self
    }
}

impl CrossSectionSource for InMemorySource {
    fn material_id(&self) -> u32 {
        self.material_id
    }

    fn parent(&self) -> Result<Kza> {
        Ok(self.parent)
    }

    fn reaction_codes(&self) -> Vec<u16> {
        self.sections.keys().copied().collect()
    }

    fn cross_sections(&self, mt: u16) -> Result<Vec<f64>> {
        self.sections
            .get(&mt)
            .cloned()
            .ok_or(Error::SectionNotFound {
                parent: self.parent,
                mt,
            })
    }
}

/// Add every reaction of a parent to the network
///
/// Returns the parent and the number of reactions that were placed. Only a
/// source that can not name its parent is an error, everything else is
/// recorded in `failures` under the parent name and skipped.
///
/// Gas production totals go to the light gas daughter under their own MT.
/// Every other reaction goes to its residual nucleus, plus a companion entry
/// under each light gas it emits, weighted by multiplicity, so that the gas
/// totals can later be reconciled with [crate::disambiguate_gas].
pub fn assemble<S: CrossSectionSource + ?Sized>(
    source: &S,
    taxonomy: &Taxonomy,
    policy: &IsomerPolicy,
    network: &mut ReactionNetwork,
    failures: &mut FailureLog,
) -> Result<(Kza, usize)> {
    let parent = source.parent()?;
    let name = parent.name();
    let group_count = network.group_count();

    debug!(
        "Assembling {name} (MAT {}) from {} reactions",
        source.material_id(),
        source.reaction_codes().len()
    );

    let mut seen = BTreeSet::new();
    let mut placed = 0;

    for mt in source.reaction_codes() {
        if !seen.insert(mt) {
            warn!("{name}: MT{mt} listed more than once, ignoring repeat");
            continue;
        }

        let Some(descriptor) = taxonomy.get(mt) else {
            debug!("{name}: MT{mt} not in reaction table");
            failures.record(&name, Some(mt), "unknown reaction type");
            continue;
        };

        if !descriptor.is_quantifiable() {
            trace!("{name}: MT{mt} {} has no single residual", descriptor.description);
            failures.record(
                &name,
                Some(mt),
                f!("unquantifiable {}", descriptor.description),
            );
            continue;
        }

        let cross_sections = match source
            .cross_sections(mt)
            .and_then(|xs| fit_groups(mt, xs, group_count))
        {
            Ok(xs) => xs,
            Err(e) => {
                warn!("{name}: skipping MT{mt}, {e}");
                failures.record(&name, Some(mt), e.to_string());
                continue;
            }
        };

        if let Some(gas) = descriptor.gas {
            network.accumulate(
                parent,
                DaughterKey::Nuclide(gas.kza()),
                ReactionKey::Mt(mt),
                ReactionEntry::new(&descriptor.signature, cross_sections),
            );
            placed += 1;
            continue;
        }

        let Some((delta_z, delta_a)) = descriptor.emission.za_change() else {
            continue;
        };

        let Some(ground) = parent.ground().shift(delta_z, delta_a) else {
            debug!("{name}: MT{mt} leaves no residual nucleus");
            failures.record(&name, Some(mt), "no physical residual");
            continue;
        };

        let level = match is_excited_state_specific(mt) {
            true => descriptor.level,
            false => descriptor.level + parent.m(),
        };

        let (daughter, reaction) = match policy.resolve(parent, ground, level) {
            Decision::KeepAsGroundState => (DaughterKey::Nuclide(ground), ReactionKey::Mt(mt)),
            Decision::KeepAsDistinctIsomer(isomer) => {
                (DaughterKey::Nuclide(isomer), ReactionKey::Mt(mt))
            }
            Decision::Unresolved(Fallback::DecayToGround) => {
                (DaughterKey::Nuclide(ground), ReactionKey::GroundDecay)
            }
            Decision::Unresolved(Fallback::AmalgamateUnknown) => (
                DaughterKey::UnresolvedIsomers(ground),
                ReactionKey::UnresolvedIsomer,
            ),
        };

        trace!("{name}: MT{mt} -> {daughter} as {reaction}");

        for (gas, count) in descriptor.emission.gas_counts() {
            network.accumulate(
                parent,
                DaughterKey::Nuclide(gas.kza()),
                ReactionKey::Mt(mt),
                ReactionEntry::new(
                    &descriptor.signature,
                    cross_sections.iter().map(|xs| xs * count as f64).collect(),
                ),
            );
        }

        network.accumulate(
            parent,
            daughter,
            reaction,
            ReactionEntry::new(&descriptor.signature, cross_sections),
        );
        placed += 1;
    }

    Ok((parent, placed))
}

/// Pad a vector to the group structure, rejecting anything too long
fn fit_groups(mt: u16, mut cross_sections: Vec<f64>, group_count: usize) -> Result<Vec<f64>> {
    if cross_sections.len() > group_count {
        return Err(Error::TooManyGroups {
            mt,
            expected: group_count,
            found: cross_sections.len(),
        });
    }
    cross_sections.resize(group_count, 0.0);
    Ok(cross_sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radionuclides::Radionuclides;

    fn kza(value: u32) -> Kza {
        Kza::from_raw(value)
    }

    fn build(source: &InMemorySource, policy: &IsomerPolicy) -> (ReactionNetwork, FailureLog) {
        let taxonomy = Taxonomy::endf().unwrap();
        let mut network = ReactionNetwork::new(4);
        let mut failures = FailureLog::default();
        assemble(source, &taxonomy, policy, &mut network, &mut failures).unwrap();
        (network, failures)
    }

    #[test]
    fn padding() {
        assert_eq!(fit_groups(16, vec![1.0], 3).unwrap(), vec![1.0, 0.0, 0.0]);
        assert!(matches!(
            fit_groups(16, vec![1.0; 4], 3),
            Err(Error::TooManyGroups { mt: 16, expected: 3, found: 4 })
        ));
    }

    #[test]
    fn ground_state_reactions() {
        let source = InMemorySource::new(2631, kza(260560))
            .with_section(16, vec![0.0, 1.5])
            .with_section(103, vec![1.0, 0.0, 0.0, 0.0]);
        let (network, failures) = build(&source, &IsomerPolicy::default());

        let fe55 = network
            .reactions(kza(260560), DaughterKey::Nuclide(kza(260550)))
            .unwrap();
        assert_eq!(fe55[&ReactionKey::Mt(16)].cross_sections, vec![0.0, 1.5, 0.0, 0.0]);
        assert_eq!(fe55[&ReactionKey::Mt(16)].emission, "2n");

        // companion entry for the emitted proton
        let proton = network
            .reactions(kza(260560), DaughterKey::Nuclide(kza(10010)))
            .unwrap();
        assert_eq!(proton[&ReactionKey::Mt(103)].emission, "p");
        assert!(network
            .reactions(kza(260560), DaughterKey::Nuclide(kza(250560)))
            .is_some());
        assert!(failures.is_empty());
    }

    #[test]
    fn unknown_and_unquantifiable() {
        let source = InMemorySource::new(2631, kza(260560))
            .with_section(1, vec![1.0])
            .with_section(18, vec![1.0])
            .with_section(999, vec![1.0])
            .with_section(102, vec![1.0]);
        let (network, failures) = build(&source, &IsomerPolicy::default());

        assert_eq!(network.len(), 1);
        assert_eq!(
            failures.iter().map(|f| f.mt).collect::<Vec<Option<u16>>>(),
            vec![Some(1), Some(18), Some(999)]
        );
    }

    #[test]
    fn too_many_groups_skipped() {
        let source = InMemorySource::new(2631, kza(260560))
            .with_section(16, vec![1.0; 5])
            .with_section(102, vec![1.0; 4]);
        let (network, failures) = build(&source, &IsomerPolicy::default());

        assert_eq!(network.len(), 1);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures.iter().next().unwrap().mt, Some(16));
    }

    #[test]
    fn isomer_decisions() {
        // MT51 (z,n1) leaves Fe56 in its first excited level
        let source = InMemorySource::new(2631, kza(260560)).with_section(51, vec![1.0]);

        let known: Radionuclides = [kza(260561)].into_iter().collect();
        let (network, _) = build(&source, &IsomerPolicy::new(known, Fallback::DecayToGround));
        assert!(network
            .reactions(kza(260560), DaughterKey::Nuclide(kza(260561)))
            .is_some_and(|r| r.contains_key(&ReactionKey::Mt(51))));

        let policy = IsomerPolicy::new(Radionuclides::default(), Fallback::DecayToGround);
        let (network, _) = build(&source, &policy);
        assert!(network
            .reactions(kza(260560), DaughterKey::Nuclide(kza(260560)))
            .is_some_and(|r| r.contains_key(&ReactionKey::GroundDecay)));

        let policy = IsomerPolicy::new(Radionuclides::default(), Fallback::AmalgamateUnknown);
        let (network, _) = build(&source, &policy);
        assert!(network
            .reactions(kza(260560), DaughterKey::UnresolvedIsomers(kza(260560)))
            .is_some_and(|r| r.contains_key(&ReactionKey::UnresolvedIsomer)));
    }

    #[test]
    fn parent_level_carried() {
        // (n,γ) on Ag110m1 gives Ag111m1, unless the MT names the level
        let known: Radionuclides = [kza(471111)].into_iter().collect();
        let policy = IsomerPolicy::new(known, Fallback::DecayToGround);

        let source = InMemorySource::new(4731, kza(471101))
            .with_section(102, vec![1.0])
            .with_section(50, vec![1.0]);
        let (network, _) = build(&source, &policy);

        assert!(network
            .reactions(kza(471101), DaughterKey::Nuclide(kza(471111)))
            .is_some_and(|r| r.contains_key(&ReactionKey::Mt(102))));
        // (z,n0) leaves the ground state whatever the target level
        assert!(network
            .reactions(kza(471101), DaughterKey::Nuclide(kza(471100)))
            .is_some_and(|r| r.contains_key(&ReactionKey::Mt(50))));
    }

    #[test]
    fn impossible_residual() {
        // (n,3α) on deuterium
        let source = InMemorySource::new(128, kza(10020)).with_section(109, vec![1.0]);
        let (network, failures) = build(&source, &IsomerPolicy::default());
        assert!(network.is_empty());
        assert_eq!(failures.iter().next().unwrap().reason, "no physical residual");
    }

    #[test]
    fn gas_multiplicity() {
        let source = InMemorySource::new(2631, kza(260560)).with_section(108, vec![1.0, 2.0]);
        let (network, _) = build(&source, &IsomerPolicy::default());

        let alpha = network
            .reactions(kza(260560), DaughterKey::Nuclide(kza(20040)))
            .unwrap();
        assert_eq!(alpha[&ReactionKey::Mt(108)].cross_sections, vec![2.0, 4.0, 0.0, 0.0]);
        assert_eq!(alpha[&ReactionKey::Mt(108)].emission, "2α");
    }
}
