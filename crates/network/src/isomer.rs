//! Handling of isomeric daughters
//!
//! A reaction may leave the residual in an excited level. That level is only
//! worth tracking as a separate nuclide if the decay library knows about it,
//! otherwise it is either decayed straight to the ground state or collected
//! with every other unknown isomer of the same ground state.

// internal modules
use crate::radionuclides::Radionuclides;

// actnet modules
use actnet_nuclide::Kza;

// external crates
use log::warn;

/// What to do with an isomer that has no decay data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fallback {
    /// Add the pathway to the ground state daughter
    #[default]
    DecayToGround,
    /// Collect the pathway in the unresolved isomer bucket
    AmalgamateUnknown,
}

/// Outcome for a single daughter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    KeepAsGroundState,
    KeepAsDistinctIsomer(Kza),
    Unresolved(Fallback),
}

/// Isomer resolution against a set of known radionuclides
///
/// ```rust
/// # use actnet_network::{Decision, Fallback, IsomerPolicy, Radionuclides};
/// # use actnet_nuclide::Kza;
/// let known: Radionuclides = [Kza::from_raw(270601)].into_iter().collect();
/// let policy = IsomerPolicy::new(known, Fallback::DecayToGround);
///
/// let parent = Kza::from_raw(270590);
/// let co60 = Kza::from_raw(270600);
///
/// assert_eq!(policy.resolve(parent, co60, 0), Decision::KeepAsGroundState);
/// assert_eq!(
///     policy.resolve(parent, co60, 1),
///     Decision::KeepAsDistinctIsomer(Kza::from_raw(270601))
/// );
/// assert_eq!(
///     policy.resolve(parent, co60, 2),
///     Decision::Unresolved(Fallback::DecayToGround)
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsomerPolicy {
    radionuclides: Radionuclides,
    fallback: Fallback,
}

impl IsomerPolicy {
    pub fn new(radionuclides: Radionuclides, fallback: Fallback) -> Self {
        Self {
            radionuclides,
            fallback,
        }
    }

    pub fn fallback(&self) -> Fallback {
        self.fallback
    }

    pub fn radionuclides(&self) -> &Radionuclides {
        &self.radionuclides
    }

    /// Decide where a daughter at `level` above `daughter_ground` belongs
    ///
    /// Levels above 9 can not be packed into a KZA and always end up
    /// unresolved, with a warning.
    pub fn resolve(&self, parent: Kza, daughter_ground: Kza, level: u32) -> Decision {
        if level == 0 {
            return Decision::KeepAsGroundState;
        }

        match daughter_ground.with_isomer(level) {
            Ok(isomer) if self.radionuclides.contains(isomer) => {
                Decision::KeepAsDistinctIsomer(isomer)
            }
            Ok(_) => Decision::Unresolved(self.fallback),
            Err(_) => {
                warn!(
                    "{parent}: level {level} of {} exceeds the KZA encoding",
                    daughter_ground.name()
                );
                Decision::Unresolved(self.fallback)
            }
        }
    }
}
