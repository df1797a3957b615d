//! Batch processing of many isotopes into one network
//!
//! Isotopes are processed one at a time. Anything that goes wrong with an
//! isotope, or with a single reaction of an isotope, is logged and recorded
//! in the [FailureLog] and the batch carries on with the next one.

// internal modules
use crate::amalgamate::amalgamate;
use crate::assemble::{assemble, CrossSectionSource};
use crate::error::{Error, Result};
use crate::failures::FailureLog;
use crate::gas::{disambiguate_gas, GasPolicy};
use crate::isomer::{Fallback, IsomerPolicy};
use crate::network::ReactionNetwork;
use crate::radionuclides::Radionuclides;
use crate::taxonomy::Taxonomy;

// standard library
#[cfg(feature = "gendf")]
use std::path::Path;

// external crates
use kdam::{Bar, BarBuilder, BarExt};
use log::{debug, info, warn};

/// Settings for building a network
///
/// ```rust
/// # use actnet_network::{Fallback, GasPolicy, Options};
/// let mut options = Options::default();
/// assert_eq!(options.group_count(), 175);
/// assert_eq!(options.fallback(), Fallback::DecayToGround);
/// assert_eq!(options.gas_policy(), GasPolicy::Subtract);
///
/// options.set_group_count(42);
/// options.set_gas_policy(GasPolicy::Remove);
/// options.disable_progress();
/// assert!(!options.progress());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Number of energy groups, VITAMIN-J by default
    group_count: usize,
    /// Where isomers without decay data go
    fallback: Fallback,
    /// How to reconcile gas totals
    gas_policy: GasPolicy,
    /// Collapse parallel pathways
    amalgamate: bool,
    /// Show a progress bar over isotopes
    progress: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            group_count: 175,
            fallback: Fallback::DecayToGround,
            gas_policy: GasPolicy::Subtract,
            amalgamate: false,
            progress: true,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn set_group_count(&mut self, group_count: usize) {
        self.group_count = group_count;
    }

    pub fn set_fallback(&mut self, fallback: Fallback) {
        self.fallback = fallback;
    }

    pub fn set_gas_policy(&mut self, gas_policy: GasPolicy) {
        self.gas_policy = gas_policy;
    }

    pub fn set_amalgamate(&mut self, amalgamate: bool) {
        self.amalgamate = amalgamate;
    }

    /// Do not print the progress bar
    pub fn disable_progress(&mut self) {
        self.progress = false;
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn fallback(&self) -> Fallback {
        self.fallback
    }

    pub fn gas_policy(&self) -> GasPolicy {
        self.gas_policy
    }

    pub fn amalgamate(&self) -> bool {
        self.amalgamate
    }

    pub fn progress(&self) -> bool {
        self.progress
    }
}

/// Incremental network builder
///
/// Isotopes are added one at a time with [Batch::add()], and
/// [Batch::finish()] applies the whole-network steps (gas reconciliation and
/// optional amalgamation).
///
/// ```rust
/// # use actnet_network::{Batch, InMemorySource, Options, Radionuclides, Taxonomy};
/// # use actnet_nuclide::Kza;
/// let taxonomy = Taxonomy::endf().unwrap();
/// let mut batch = Batch::new(taxonomy, Radionuclides::default(), Options::default());
///
/// let fe56 = InMemorySource::new(2631, Kza::from_raw(260560)).with_section(16, vec![1.5]);
/// assert!(batch.add("Fe56", &fe56));
///
/// let (network, failures) = batch.finish();
/// assert_eq!(network.len(), 1);
/// assert!(failures.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Batch {
    taxonomy: Taxonomy,
    policy: IsomerPolicy,
    options: Options,
    network: ReactionNetwork,
    failures: FailureLog,
}

impl Batch {
    pub fn new(taxonomy: Taxonomy, radionuclides: Radionuclides, options: Options) -> Self {
        Self {
            policy: IsomerPolicy::new(radionuclides, options.fallback()),
            network: ReactionNetwork::new(options.group_count()),
            failures: FailureLog::default(),
            taxonomy,
            options,
        }
    }

    /// Assemble one isotope, returning false if it failed completely
    pub fn add<S: CrossSectionSource + ?Sized>(&mut self, isotope: &str, source: &S) -> bool {
        if let Ok(parent) = source.parent() {
            if self.network.get(parent).is_some() {
                warn!("{isotope}: {parent} already in the network, accumulating");
            }
        }

        match assemble(
            source,
            &self.taxonomy,
            &self.policy,
            &mut self.network,
            &mut self.failures,
        ) {
            Ok((parent, placed)) => {
                debug!("{isotope}: placed {placed} reactions for {parent}");
                if placed == 0 {
                    warn!("{isotope}: no usable reactions");
                }
                true
            }
            Err(e) => {
                self.fail(isotope, e.to_string());
                false
            }
        }
    }

    /// Read and assemble a GENDF tape
    #[cfg(feature = "gendf")]
    pub fn add_gendf<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        let isotope = path.display().to_string();
        match actnet_gendf::Tape::from_file(path) {
            Ok(tape) => self.add(&isotope, &tape),
            Err(e) => {
                self.fail(&isotope, e.to_string());
                false
            }
        }
    }

    /// Record an isotope that failed before it could be assembled
    pub fn fail<S: Into<String>>(&mut self, isotope: &str, reason: S) {
        let reason = reason.into();
        warn!("{isotope}: {reason}");
        self.failures.record(isotope, None, reason);
    }

    pub fn network(&self) -> &ReactionNetwork {
        &self.network
    }

    pub fn failures(&self) -> &FailureLog {
        &self.failures
    }

    /// Apply the whole-network steps and hand back the results
    pub fn finish(self) -> (ReactionNetwork, FailureLog) {
        let Self {
            mut network,
            failures,
            options,
            ..
        } = self;

        disambiguate_gas(&mut network, options.gas_policy());

        if options.amalgamate() {
            amalgamate(&mut network);
        }

        info!(
            "Network of {} parents and {} pathways, {} failures",
            network.parents().count(),
            network.len(),
            failures.len()
        );

        (network, failures)
    }
}

/// Build a network from a list of isotopes
///
/// Each item is the isotope name and either a source of cross sections or
/// the reason it could not be read. Failed items are recorded and skipped.
/// Only a broken progress bar stops the batch.
pub fn run_batch<S, I>(
    inputs: I,
    taxonomy: Taxonomy,
    radionuclides: Radionuclides,
    options: Options,
) -> Result<(ReactionNetwork, FailureLog)>
where
    S: CrossSectionSource,
    I: IntoIterator<Item = (String, Result<S>)>,
{
    let inputs: Vec<(String, Result<S>)> = inputs.into_iter().collect();
    let mut progress_bar = init_progress_bar(inputs.len(), !options.progress())?;
    let show_progress = options.progress();
    let mut batch = Batch::new(taxonomy, radionuclides, options);

    for (isotope, source) in inputs {
        match source {
            Ok(source) => {
                batch.add(&isotope, &source);
            }
            Err(e) => batch.fail(&isotope, e.to_string()),
        }

        if show_progress {
            progress_bar.update(1)?;
        }
    }

    if show_progress {
        eprintln!();
    }

    Ok(batch.finish())
}

/// Build a network from GENDF tapes on disk
#[cfg(feature = "gendf")]
pub fn run_gendf_batch<P: AsRef<Path>>(
    paths: &[P],
    taxonomy: Taxonomy,
    radionuclides: Radionuclides,
    options: Options,
) -> Result<(ReactionNetwork, FailureLog)> {
    let inputs = paths.iter().map(|path| {
        let path = path.as_ref();
        let tape = actnet_gendf::Tape::from_file(path).map_err(Error::from);
        (path.display().to_string(), tape)
    });

    run_batch(inputs, taxonomy, radionuclides, options)
}

/// Initialise the progress bar, if wanted
fn init_progress_bar(total: usize, disable: bool) -> Result<Bar> {
    BarBuilder::default()
        .total(total)
        .unit(" isotopes")
        .disable(disable)
        .bar_format("{count}/{total} isotopes [{rate} isotopes/s]   ")
        .build()
        .map_err(Error::ProgressError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::InMemorySource;
    use crate::network::{DaughterKey, ReactionKey};
    use actnet_nuclide::Kza;

    fn options() -> Options {
        let mut options = Options::default();
        options.set_group_count(2);
        options.disable_progress();
        options
    }

    #[test]
    fn partial_failure() {
        let good =
            InMemorySource::new(2631, Kza::from_raw(260560)).with_section(16, vec![1.0, 2.0]);
        let inputs = vec![
            ("Fe56".to_string(), Ok(good)),
            (
                "U235".to_string(),
                Err(Error::ParseError("njoy failed".into())),
            ),
        ];

        let (network, failures) = run_batch(
            inputs,
            Taxonomy::endf().unwrap(),
            Radionuclides::default(),
            options(),
        )
        .unwrap();

        assert_eq!(network.len(), 1);
        assert_eq!(
            failures.failed_isotopes().collect::<Vec<&str>>(),
            vec!["U235"]
        );
    }

    #[test]
    fn gas_policy_applied() {
        let source = InMemorySource::new(2631, Kza::from_raw(260560))
            .with_section(207, vec![1.0, 1.0])
            .with_section(107, vec![0.25, 0.5]);

        let mut options = options();
        options.set_gas_policy(GasPolicy::Remove);
        let (network, _) = run_batch(
            [("Fe56".to_string(), Ok(source))],
            Taxonomy::endf().unwrap(),
            Radionuclides::default(),
            options,
        )
        .unwrap();

        let alpha = network
            .reactions(Kza::from_raw(260560), DaughterKey::Nuclide(Kza::from_raw(20040)))
            .unwrap();
        assert_eq!(alpha.len(), 1);
        assert!(alpha.contains_key(&ReactionKey::Mt(207)));
    }

    #[test]
    fn amalgamation_applied() {
        let source = InMemorySource::new(2631, Kza::from_raw(260560))
            .with_section(16, vec![1.0, 0.0])
            .with_section(875, vec![0.0, 1.0]);

        let mut options = options();
        options.set_amalgamate(true);
        let mut batch = Batch::new(Taxonomy::endf().unwrap(), Radionuclides::default(), options);
        assert!(batch.add("Fe56", &source));
        let (network, _) = batch.finish();

        let fe55 = network
            .reactions(Kza::from_raw(260560), DaughterKey::Nuclide(Kza::from_raw(260550)))
            .unwrap();
        assert_eq!(fe55[&ReactionKey::Amalgamated].cross_sections, vec![1.0, 1.0]);
        assert_eq!(fe55[&ReactionKey::Amalgamated].emission, "2n");
    }
}
