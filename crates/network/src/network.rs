//! Nested parent to daughter reaction network

// actnet modules
use actnet_nuclide::Kza;
use actnet_utils::StringExt;

// standard library
use std::cmp::Ordering;
use std::collections::BTreeMap;

// external crates
use log::warn;

/// Every pathway between one parent and one daughter
pub type Reactions = BTreeMap<ReactionKey, ReactionEntry>;

/// Every daughter of one parent
pub type Daughters = BTreeMap<DaughterKey, Reactions>;

/// Daughter side of a pathway
///
/// Ordered by KZA first so that the unresolved isomers of a ground state
/// sort straight after that ground state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DaughterKey {
    /// An ordinary daughter nuclide
    Nuclide(Kza),
    /// All unresolved isomers of a ground state, written as `<kza>*`
    UnresolvedIsomers(Kza),
}

impl DaughterKey {
    /// Nuclide identifier, the ground state for unresolved isomers
    pub fn kza(&self) -> Kza {
        match self {
            DaughterKey::Nuclide(kza) | DaughterKey::UnresolvedIsomers(kza) => *kza,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            DaughterKey::Nuclide(_) => 0,
            DaughterKey::UnresolvedIsomers(_) => 1,
        }
    }
}

impl Ord for DaughterKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.kza(), self.rank()).cmp(&(other.kza(), other.rank()))
    }
}

impl PartialOrd for DaughterKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for DaughterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DaughterKey::Nuclide(kza) => write!(f, "{kza}"),
            DaughterKey::UnresolvedIsomers(kza) => write!(f, "{kza}*"),
        }
    }
}

/// Reaction side of a pathway, a real MT or one of the pseudo codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReactionKey {
    Mt(u16),
    /// Unknown isomers decayed into the ground state
    GroundDecay,
    /// Unknown isomers kept together
    UnresolvedIsomer,
    /// Every pathway to a daughter collapsed into one
    Amalgamated,
}

impl std::fmt::Display for ReactionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ReactionKey::Mt(mt) => write!(f, "MT{mt}"),
            ReactionKey::GroundDecay => write!(f, "ground decay"),
            ReactionKey::UnresolvedIsomer => write!(f, "unresolved isomer"),
            ReactionKey::Amalgamated => write!(f, "amalgamated"),
        }
    }
}

/// Emission tag and groupwise cross sections of a pathway
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReactionEntry {
    /// Comma separated emission signatures of everything summed in
    pub emission: String,
    /// Cross sections, highest energy group first
    pub cross_sections: Vec<f64>,
}

impl ReactionEntry {
    pub fn new<S: Into<String>>(emission: S, cross_sections: Vec<f64>) -> Self {
        Self {
            emission: emission.into(),
            cross_sections,
        }
    }

    /// Sum over all groups
    pub fn total(&self) -> f64 {
        self.cross_sections.iter().sum()
    }

    /// Element-wise sum with another entry, merging the emission tags
    ///
    /// ```rust
    /// # use actnet_network::ReactionEntry;
    /// let mut entry = ReactionEntry::new("n", vec![1.0, 2.0]);
    /// entry.add(&ReactionEntry::new("2n", vec![0.5, 0.5]));
    /// assert_eq!(entry.emission, "n,2n");
    /// assert_eq!(entry.cross_sections, vec![1.5, 2.5]);
    /// ```
    pub fn add(&mut self, other: &ReactionEntry) {
        if other.cross_sections.len() > self.cross_sections.len() {
            self.cross_sections.resize(other.cross_sections.len(), 0.0);
        }

        self.cross_sections
            .iter_mut()
            .zip(&other.cross_sections)
            .for_each(|(a, b)| *a += b);

        self.emission = self.emission.union_csv(&other.emission);
    }
}

/// Activation reaction network
///
/// Pathways are stored as `parent -> daughter -> reaction -> entry`, with
/// every level ordered so that iteration and output are deterministic.
///
/// ```rust
/// # use actnet_network::{DaughterKey, ReactionEntry, ReactionKey, ReactionNetwork};
/// # use actnet_nuclide::Kza;
/// let fe56 = Kza::from_raw(260560);
/// let fe55 = DaughterKey::Nuclide(Kza::from_raw(260550));
///
/// let mut network = ReactionNetwork::new(2);
/// network.accumulate(fe56, fe55, ReactionKey::Mt(16), ReactionEntry::new("2n", vec![0.0, 1.5]));
/// network.accumulate(fe56, fe55, ReactionKey::Mt(16), ReactionEntry::new("2n", vec![0.5, 0.0]));
///
/// let entry = &network.reactions(fe56, fe55).unwrap()[&ReactionKey::Mt(16)];
/// assert_eq!(entry.cross_sections, vec![0.5, 1.5]);
/// assert_eq!(network.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReactionNetwork {
    group_count: usize,
    parents: BTreeMap<Kza, Daughters>,
}

impl ReactionNetwork {
    /// Empty network with `group_count` energy groups
    pub fn new(group_count: usize) -> Self {
        Self {
            group_count,
            parents: BTreeMap::new(),
        }
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Add a pathway, summing into any existing entry with the same keys
    pub fn accumulate(
        &mut self,
        parent: Kza,
        daughter: DaughterKey,
        reaction: ReactionKey,
        entry: ReactionEntry,
    ) {
        let reactions = self
            .parents
            .entry(parent)
            .or_default()
            .entry(daughter)
            .or_default();

        match reactions.get_mut(&reaction) {
            Some(existing) => existing.add(&entry),
            None => {
                reactions.insert(reaction, entry);
            }
        }
    }

    /// Combine with a network built independently
    ///
    /// Every entry is accumulated, so the order of merging does not change
    /// the result. Networks with different group counts take the larger
    /// count, and every shorter vector is padded with zeros to match.
    pub fn merge(&mut self, other: ReactionNetwork) {
        let mismatch = other.group_count != self.group_count;
        if mismatch {
            warn!(
                "Merging networks with {} and {} groups",
                self.group_count, other.group_count
            );
            self.group_count = self.group_count.max(other.group_count);
        }

        for (parent, daughters) in other.parents {
            for (daughter, reactions) in daughters {
                for (reaction, entry) in reactions {
                    self.accumulate(parent, daughter, reaction, entry);
                }
            }
        }

        if mismatch {
            self.pad_groups();
        }
    }

    /// Zero pad every vector up to the group count
    fn pad_groups(&mut self) {
        let group_count = self.group_count;
        self.parents
            .values_mut()
            .flat_map(|daughters| daughters.values_mut())
            .flat_map(|reactions| reactions.values_mut())
            .filter(|entry| entry.cross_sections.len() < group_count)
            .for_each(|entry| entry.cross_sections.resize(group_count, 0.0));
    }

    /// Every daughter of a parent
    pub fn get(&self, parent: Kza) -> Option<&Daughters> {
        self.parents.get(&parent)
    }

    /// Every pathway between a parent and a daughter
    pub fn reactions(&self, parent: Kza, daughter: DaughterKey) -> Option<&Reactions> {
        self.parents.get(&parent)?.get(&daughter)
    }

    /// Parents in ascending KZA order
    pub fn parents(&self) -> impl Iterator<Item = &Kza> {
        self.parents.keys()
    }

    pub(crate) fn parents_mut(&mut self) -> impl Iterator<Item = (&Kza, &mut Daughters)> {
        self.parents.iter_mut()
    }

    /// Every pathway in output order
    pub fn iter(&self) -> impl Iterator<Item = (Kza, DaughterKey, ReactionKey, &ReactionEntry)> {
        self.parents.iter().flat_map(|(parent, daughters)| {
            daughters.iter().flat_map(move |(daughter, reactions)| {
                reactions
                    .iter()
                    .map(move |(reaction, entry)| (*parent, *daughter, *reaction, entry))
            })
        })
    }

    /// Total number of pathways
    pub fn len(&self) -> usize {
        self.parents
            .values()
            .flat_map(|daughters| daughters.values())
            .map(|reactions| reactions.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
