// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use ttrec_core::{ObjectCollection, ObjectFlags, TtrecError};

/// Kinematic windows and quality requirements for baseline and signal
/// objects. Momenta are in GeV.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionConfig {
    /// Minimum jet transverse momentum.
    pub jet_pt_min: f64,
    /// Pseudorapidity acceptance for signal jets.
    pub jet_eta_max: f64,
    /// Tighter pseudorapidity acceptance for b-tagged jets.
    pub b_jet_eta_max: f64,
    /// Extended acceptance used when counting poor-quality jets.
    pub bad_jet_eta_max: f64,
    /// Pseudorapidity acceptance for hadronic tau candidates.
    pub tau_eta_max: f64,
    /// Minimum electron transverse momentum.
    pub electron_pt_min: f64,
    /// Pseudorapidity acceptance for electrons.
    pub electron_eta_max: f64,
    /// Minimum muon transverse momentum.
    pub muon_pt_min: f64,
    /// Pseudorapidity acceptance for muons.
    pub muon_eta_max: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            jet_pt_min: 20.0,
            jet_eta_max: 2.8,
            b_jet_eta_max: 2.5,
            bad_jet_eta_max: 4.5,
            tau_eta_max: 2.5,
            electron_pt_min: 4.5,
            electron_eta_max: 2.47,
            muon_pt_min: 4.0,
            muon_eta_max: 2.7,
        }
    }
}

impl SelectionConfig {
    fn validate(&self) -> Result<(), TtrecError> {
        let thresholds = [
            ("jet_pt_min", self.jet_pt_min),
            ("jet_eta_max", self.jet_eta_max),
            ("b_jet_eta_max", self.b_jet_eta_max),
            ("bad_jet_eta_max", self.bad_jet_eta_max),
            ("tau_eta_max", self.tau_eta_max),
            ("electron_pt_min", self.electron_pt_min),
            ("electron_eta_max", self.electron_eta_max),
            ("muon_pt_min", self.muon_pt_min),
            ("muon_eta_max", self.muon_eta_max),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(TtrecError::invalid_input(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Applies the kinematic windows to raw and overlap-resolved collections.
///
/// Every method returns a fresh collection (or a count); inputs are never
/// mutated, so the same selector can be shared across events and threads.
#[derive(Clone, Debug)]
pub struct Selector {
    config: SelectionConfig,
}

fn in_window(pt: f64, eta: f64, pt_min: f64, eta_max: f64) -> bool {
    pt > pt_min && eta.abs() < eta_max
}

impl Selector {
    pub fn new(config: SelectionConfig) -> Result<Self, TtrecError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Jets entering the overlap cascade: inside the signal window and
    /// passing the jet-vertex-tagger requirement.
    pub fn baseline_jets(&self, jets: &ObjectCollection) -> ObjectCollection {
        let cfg = &self.config;
        jets.filtered(|jet| {
            in_window(jet.pt(), jet.eta(), cfg.jet_pt_min, cfg.jet_eta_max)
                && jet.has(ObjectFlags::JET_VERTEX_TAGGED)
        })
    }

    pub fn baseline_electrons(&self, electrons: &ObjectCollection) -> ObjectCollection {
        let cfg = &self.config;
        electrons.filtered(|el| {
            in_window(el.pt(), el.eta(), cfg.electron_pt_min, cfg.electron_eta_max)
        })
    }

    pub fn baseline_muons(&self, muons: &ObjectCollection) -> ObjectCollection {
        let cfg = &self.config;
        muons.filtered(|mu| in_window(mu.pt(), mu.eta(), cfg.muon_pt_min, cfg.muon_eta_max))
    }

    /// Signal jets from the overlap-resolved jet collection. The window is
    /// re-applied because the cascade may keep jets whose flags changed
    /// meaning upstream; the filter is idempotent on already-selected input.
    pub fn signal_jets(&self, resolved_jets: &ObjectCollection) -> ObjectCollection {
        self.baseline_jets(resolved_jets)
    }

    /// Signal jets without a b-tag, keeping their input order.
    pub fn light_jets(&self, signal_jets: &ObjectCollection) -> ObjectCollection {
        signal_jets.filtered(|jet| !jet.is_b_tagged())
    }

    /// B-tagged signal jets inside the tighter b-jet acceptance.
    pub fn b_jets(&self, signal_jets: &ObjectCollection) -> ObjectCollection {
        let eta_max = self.config.b_jet_eta_max;
        signal_jets.filtered(|jet| jet.is_b_tagged() && jet.eta().abs() < eta_max)
    }

    /// Track-poor signal jets compatible with a hadronic tau decay.
    pub fn tau_candidates(&self, signal_jets: &ObjectCollection) -> ObjectCollection {
        let eta_max = self.config.tau_eta_max;
        signal_jets.filtered(|jet| {
            jet.eta().abs() < eta_max && jet.has(ObjectFlags::AT_MOST_4_TRACKS)
        })
    }

    /// Number of signal jets failing the loose quality criteria, counted in
    /// the extended pseudorapidity range.
    pub fn bad_jet_count(&self, signal_jets: &ObjectCollection) -> usize {
        let cfg = &self.config;
        signal_jets.count(|jet| {
            in_window(jet.pt(), jet.eta(), cfg.jet_pt_min, cfg.bad_jet_eta_max)
                && !jet.has(ObjectFlags::LOOSE_QUALITY)
        })
    }

    /// Baseline leptons surviving overlap removal, re-counted in their
    /// respective windows.
    pub fn lepton_count(
        &self,
        resolved_electrons: &ObjectCollection,
        resolved_muons: &ObjectCollection,
    ) -> usize {
        self.baseline_electrons(resolved_electrons).len()
            + self.baseline_muons(resolved_muons).len()
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectionConfig, Selector};
    use ttrec_core::{FourVec, ObjectCollection, ObjectFlags, ObjectKind, PhysicsObject};

    fn jet(pt: f64, eta: f64, flags: ObjectFlags) -> PhysicsObject {
        PhysicsObject::new(
            FourVec::from_pt_eta_phi_m(pt, eta, 0.0, 0.0),
            ObjectKind::Jet,
            flags,
        )
    }

    fn selector() -> Selector {
        Selector::new(SelectionConfig::default()).expect("default config should validate")
    }

    #[test]
    fn rejects_negative_thresholds() {
        let config = SelectionConfig {
            jet_pt_min: -1.0,
            ..SelectionConfig::default()
        };
        assert!(Selector::new(config).is_err());
    }

    #[test]
    fn rejects_non_finite_thresholds() {
        let config = SelectionConfig {
            muon_eta_max: f64::NAN,
            ..SelectionConfig::default()
        };
        assert!(Selector::new(config).is_err());
    }

    #[test]
    fn baseline_jets_require_window_and_vertex_tag() {
        let jets: ObjectCollection = [
            jet(50.0, 0.5, ObjectFlags::JET_VERTEX_TAGGED),
            jet(50.0, 0.5, ObjectFlags::NONE), // no vertex tag
            jet(15.0, 0.5, ObjectFlags::JET_VERTEX_TAGGED), // soft
            jet(50.0, 3.0, ObjectFlags::JET_VERTEX_TAGGED), // forward
        ]
        .into_iter()
        .collect();
        assert_eq!(selector().baseline_jets(&jets).len(), 1);
    }

    #[test]
    fn b_jets_use_the_tighter_eta_window() {
        let tag = ObjectFlags::JET_VERTEX_TAGGED | ObjectFlags::B_TAGGED;
        let signal: ObjectCollection = [
            jet(60.0, 2.6, tag), // inside jet window, outside b window
            jet(60.0, 2.0, tag),
            jet(60.0, 2.0, ObjectFlags::JET_VERTEX_TAGGED),
        ]
        .into_iter()
        .collect();
        let sel = selector();
        let b = sel.b_jets(&signal);
        assert_eq!(b.len(), 1);
        assert!((b[0].eta() - 2.0).abs() < 1e-9);
        assert_eq!(sel.light_jets(&signal).len(), 1);
    }

    #[test]
    fn light_jets_keep_order_of_untagged_jets() {
        let jvt = ObjectFlags::JET_VERTEX_TAGGED;
        let signal: ObjectCollection = [
            jet(90.0, 0.0, jvt),
            jet(70.0, 0.0, jvt | ObjectFlags::B_TAGGED),
            jet(40.0, 0.0, jvt),
        ]
        .into_iter()
        .collect();
        let light = selector().light_jets(&signal);
        assert_eq!(light.len(), 2);
        assert!((light[0].pt() - 90.0).abs() < 1e-9);
        assert!((light[1].pt() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn tau_candidates_need_track_flag_and_central_eta() {
        let jvt = ObjectFlags::JET_VERTEX_TAGGED;
        let signal: ObjectCollection = [
            jet(40.0, 0.5, jvt | ObjectFlags::AT_MOST_4_TRACKS),
            jet(40.0, 2.6, jvt | ObjectFlags::AT_MOST_4_TRACKS),
            jet(40.0, 0.5, jvt),
        ]
        .into_iter()
        .collect();
        assert_eq!(selector().tau_candidates(&signal).len(), 1);
    }

    #[test]
    fn bad_jet_count_flags_missing_loose_quality() {
        let jvt = ObjectFlags::JET_VERTEX_TAGGED;
        let signal: ObjectCollection = [
            jet(40.0, 0.5, jvt | ObjectFlags::LOOSE_QUALITY),
            jet(40.0, 0.5, jvt),
            jet(40.0, 1.5, jvt),
        ]
        .into_iter()
        .collect();
        assert_eq!(selector().bad_jet_count(&signal), 2);
    }

    #[test]
    fn lepton_count_sums_both_flavours_in_their_windows() {
        let electron = PhysicsObject::new(
            FourVec::from_pt_eta_phi_m(10.0, 1.0, 0.0, 0.0),
            ObjectKind::Electron,
            ObjectFlags::NONE,
        );
        let soft_electron = PhysicsObject::new(
            FourVec::from_pt_eta_phi_m(4.0, 1.0, 0.0, 0.0),
            ObjectKind::Electron,
            ObjectFlags::NONE,
        );
        let muon = PhysicsObject::new(
            FourVec::from_pt_eta_phi_m(30.0, 2.6, 1.0, 0.0),
            ObjectKind::Muon,
            ObjectFlags::NONE,
        );
        let electrons: ObjectCollection = [electron, soft_electron].into_iter().collect();
        let muons: ObjectCollection = [muon].into_iter().collect();
        assert_eq!(selector().lepton_count(&electrons, &muons), 2);
    }
}
