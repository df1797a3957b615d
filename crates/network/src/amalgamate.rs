//! Optional collapse of parallel pathways

// internal modules
use crate::network::{ReactionEntry, ReactionKey, ReactionNetwork};

// external crates
use log::debug;

/// Collapse every parent/daughter pair with several pathways into one
///
/// The collapsed entry is keyed [ReactionKey::Amalgamated], holds the
/// element-wise sum of the pathways, and lists every distinct emission
/// signature. Pairs with a single pathway are left alone, which makes the
/// operation idempotent.
///
/// ```rust
/// # use actnet_network::{amalgamate, DaughterKey, ReactionEntry, ReactionKey, ReactionNetwork};
/// # use actnet_nuclide::Kza;
/// let parent = Kza::from_raw(260560);
/// let daughter = DaughterKey::Nuclide(Kza::from_raw(260560));
///
/// let mut network = ReactionNetwork::new(1);
/// network.accumulate(parent, daughter, ReactionKey::Mt(4), ReactionEntry::new("n", vec![1.0]));
/// network.accumulate(parent, daughter, ReactionKey::Mt(51), ReactionEntry::new("n", vec![2.0]));
/// amalgamate(&mut network);
///
/// let reactions = network.reactions(parent, daughter).unwrap();
/// assert_eq!(reactions.len(), 1);
/// assert_eq!(reactions[&ReactionKey::Amalgamated].cross_sections, vec![3.0]);
/// ```
pub fn amalgamate(network: &mut ReactionNetwork) {
    let mut collapsed = 0;

    for (_, daughters) in network.parents_mut() {
        for reactions in daughters.values_mut() {
            if reactions.len() < 2 {
                continue;
            }

            let mut combined = ReactionEntry::default();
            for entry in reactions.values() {
                combined.add(entry);
            }

            reactions.clear();
            reactions.insert(ReactionKey::Amalgamated, combined);
            collapsed += 1;
        }
    }

    debug!("Amalgamated {collapsed} parent/daughter pairs");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::DaughterKey;
    use actnet_nuclide::Kza;

    fn network() -> ReactionNetwork {
        let parent = Kza::from_raw(260560);
        let fe55 = DaughterKey::Nuclide(Kza::from_raw(260550));
        let mn56 = DaughterKey::Nuclide(Kza::from_raw(250560));

        let mut network = ReactionNetwork::new(2);
        network.accumulate(
            parent,
            fe55,
            ReactionKey::Mt(16),
            ReactionEntry::new("2n", vec![1.0, 0.0]),
        );
        network.accumulate(
            parent,
            fe55,
            ReactionKey::Mt(875),
            ReactionEntry::new("2n", vec![0.5, 0.5]),
        );
        network.accumulate(
            parent,
            fe55,
            ReactionKey::GroundDecay,
            ReactionEntry::new("2n,n", vec![0.0, 1.0]),
        );
        network.accumulate(
            parent,
            mn56,
            ReactionKey::Mt(103),
            ReactionEntry::new("p", vec![0.25, 0.0]),
        );
        network
    }

    #[test]
    fn collapse() {
        let mut network = network();
        amalgamate(&mut network);

        let fe55 = network
            .reactions(Kza::from_raw(260560), DaughterKey::Nuclide(Kza::from_raw(260550)))
            .unwrap();
        assert_eq!(fe55.len(), 1);
        assert_eq!(fe55[&ReactionKey::Amalgamated].emission, "2n,n");
        assert_eq!(fe55[&ReactionKey::Amalgamated].cross_sections, vec![1.5, 1.5]);

        let mn56 = network
            .reactions(Kza::from_raw(260560), DaughterKey::Nuclide(Kza::from_raw(250560)))
            .unwrap();
        assert!(mn56.contains_key(&ReactionKey::Mt(103)));
    }

    #[test]
    fn idempotent() {
        let mut once = network();
        amalgamate(&mut once);
        let mut twice = once.clone();
        amalgamate(&mut twice);
        assert_eq!(once, twice);
    }
}
