// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Per-event analysis pipeline: baseline selection, overlap resolution,
//! observable derivation, top-pair reconstruction and region classification.
//!
//! Jet reclustering and the stransverse-mass computation are delegated to
//! collaborator traits so the pipeline stays independent of any particular
//! clustering or minimisation backend.

pub mod observables;
pub mod regions;
pub mod selection;

pub use observables::{derive_observables, Observables};
pub use regions::accepted_regions;
pub use selection::{SelectionConfig, Selector};

use ttrec_chi2::{Chi2PairConfig, Chi2TopPairFinder, Reconstruction};
use ttrec_core::{FourVec, ObjectCollection, TtrecError};
use ttrec_overlap::{BaselineObjects, OverlapConfig, OverlapResolver};

/// Radius of the smaller reclustering pass.
pub const FAT_JET_RADIUS_SMALL: f64 = 0.8;
/// Radius of the larger reclustering pass.
pub const FAT_JET_RADIUS_LARGE: f64 = 1.2;
/// Minimum pt handed to the reclusterer.
pub const FAT_JET_PT_MIN: f64 = 20.0;

/// Reclusters small-radius jets into larger-radius jets.
///
/// Implementations must return the clusters in descending-pt order;
/// downstream observables index the leading entries directly.
pub trait JetReclusterer {
    fn recluster(&self, jets: &ObjectCollection, radius: f64, pt_min: f64) -> ObjectCollection;
}

/// Stransverse mass of a two-object system against the missing momentum.
pub trait StransverseMass {
    fn mt2(&self, a: &FourVec, b: &FourVec, met: &FourVec) -> f64;
}

/// Raw event record as delivered upstream, before any selection.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisEvent {
    pub jets: ObjectCollection,
    pub electrons: ObjectCollection,
    pub muons: ObjectCollection,
    /// Missing transverse momentum as a massless transverse four-vector.
    pub met: FourVec,
    /// Object-based missing-momentum significance, computed upstream.
    pub met_sig: f64,
}

/// Everything derived from one event. Serialize-only: the region names are
/// static strings owned by the region table.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct EventSummary {
    pub baseline: BaselineObjects,
    pub observables: Observables,
    pub reconstruction: Reconstruction,
    /// Accepting region names, in the fixed evaluation order.
    pub accepted: Vec<&'static str>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisConfig {
    pub overlap: OverlapConfig,
    pub selection: SelectionConfig,
    pub chi2: Chi2PairConfig,
}

/// Stateless per-event classifier. `classify` borrows the event and its
/// collaborators immutably, so one classifier can serve many threads.
#[derive(Clone, Debug)]
pub struct EventClassifier {
    resolver: OverlapResolver,
    selector: Selector,
    finder: Chi2TopPairFinder,
}

impl EventClassifier {
    pub fn new(config: AnalysisConfig) -> Result<Self, TtrecError> {
        Ok(Self {
            resolver: OverlapResolver::new(config.overlap)?,
            selector: Selector::new(config.selection)?,
            finder: Chi2TopPairFinder::new(config.chi2)?,
        })
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Runs the full pipeline on one event.
    ///
    /// Degenerate events are never errors: below-threshold multiplicities
    /// leave the reconstruction empty and the dependent observables at
    /// their zero defaults, and no region fires.
    pub fn classify<R, M>(
        &self,
        event: &AnalysisEvent,
        reclusterer: &R,
        stransverse: &M,
    ) -> EventSummary
    where
        R: JetReclusterer + ?Sized,
        M: StransverseMass + ?Sized,
    {
        let base_jets = self.selector.baseline_jets(&event.jets);
        let base_electrons = self.selector.baseline_electrons(&event.electrons);
        let base_muons = self.selector.baseline_muons(&event.muons);
        let baseline = self.resolver.resolve(&base_jets, &base_electrons, &base_muons);

        let n_leptons = self.selector.lepton_count(&baseline.electrons, &baseline.muons);

        let signal_jets = self.selector.signal_jets(&baseline.jets);
        let light_jets = self.selector.light_jets(&signal_jets);
        let b_jets = self.selector.b_jets(&signal_jets);
        let tau_candidates = self.selector.tau_candidates(&signal_jets);
        let n_bad_jets = self.selector.bad_jet_count(&signal_jets);

        let fat_jets_r8 =
            reclusterer.recluster(&signal_jets, FAT_JET_RADIUS_SMALL, FAT_JET_PT_MIN);
        let fat_jets_r12 =
            reclusterer.recluster(&signal_jets, FAT_JET_RADIUS_LARGE, FAT_JET_PT_MIN);

        let reconstruction = self.finder.reconstruct(&signal_jets, &b_jets, &light_jets);
        let mt2_chi2 = reconstruction.best.as_ref().map_or(0.0, |pair| {
            let (top0, top1) = pair.transverse_tops(self.finder.config().top_mass);
            stransverse.mt2(&top0, &top1, &event.met)
        });

        let observables = derive_observables(
            &signal_jets,
            &light_jets,
            &b_jets,
            &tau_candidates,
            &fat_jets_r8,
            &fat_jets_r12,
            n_leptons,
            n_bad_jets,
            &event.met,
            event.met_sig,
            mt2_chi2,
        );
        let accepted = accepted_regions(&observables);

        EventSummary {
            baseline,
            observables,
            reconstruction,
            accepted,
        }
    }
}

/// Event selection and classification for the ttrec workspace.
pub fn crate_name() -> &'static str {
    let _ = ttrec_chi2::crate_name();
    let _ = ttrec_overlap::crate_name();
    "ttrec-analysis"
}
