// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::removal::{fixed_cone, no_exemption, overlap_removal};
use ttrec_core::{ObjectCollection, ObjectFlags, PhysicsObject, TtrecError};

const DEFAULT_LEPTON_LEPTON_CONE: f64 = 0.01;
const DEFAULT_JET_LEPTON_CONE: f64 = 0.2;
const DEFAULT_MUON_JET_PT_RATIO: f64 = 0.5;
const DEFAULT_SHRINKING_CONE_MAX: f64 = 0.4;
const DEFAULT_SHRINKING_CONE_OFFSET: f64 = 0.04;
const DEFAULT_SHRINKING_CONE_SCALE: f64 = 10.0;

/// Cone thresholds for the baseline overlap-removal cascade.
///
/// The step order of the cascade is fixed; only the radii are configurable.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct OverlapConfig {
    /// Electron-muon matching cone (shared-track proxy).
    pub lepton_lepton_cone: f64,
    /// Jet-lepton cone used by the fixed-radius steps.
    pub jet_lepton_cone: f64,
    /// Muon-to-jet pt ratio above which a jet counts as muon-dominated.
    pub muon_jet_pt_ratio: f64,
    /// Upper bound of the momentum-dependent lepton cone.
    pub shrinking_cone_max: f64,
    /// Constant term of the momentum-dependent lepton cone.
    pub shrinking_cone_offset: f64,
    /// `scale / pt` term of the momentum-dependent lepton cone (GeV).
    pub shrinking_cone_scale: f64,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            lepton_lepton_cone: DEFAULT_LEPTON_LEPTON_CONE,
            jet_lepton_cone: DEFAULT_JET_LEPTON_CONE,
            muon_jet_pt_ratio: DEFAULT_MUON_JET_PT_RATIO,
            shrinking_cone_max: DEFAULT_SHRINKING_CONE_MAX,
            shrinking_cone_offset: DEFAULT_SHRINKING_CONE_OFFSET,
            shrinking_cone_scale: DEFAULT_SHRINKING_CONE_SCALE,
        }
    }
}

impl OverlapConfig {
    fn validate(&self) -> Result<(), TtrecError> {
        let fields = [
            ("lepton_lepton_cone", self.lepton_lepton_cone),
            ("jet_lepton_cone", self.jet_lepton_cone),
            ("muon_jet_pt_ratio", self.muon_jet_pt_ratio),
            ("shrinking_cone_max", self.shrinking_cone_max),
            ("shrinking_cone_offset", self.shrinking_cone_offset),
            ("shrinking_cone_scale", self.shrinking_cone_scale),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(TtrecError::invalid_input(format!(
                    "OverlapConfig.{name} must be finite and >= 0; got {value}"
                )));
            }
        }
        Ok(())
    }

    fn shrinking_cone(&self, lepton: &PhysicsObject) -> f64 {
        self.shrinking_cone_max
            .min(self.shrinking_cone_offset + self.shrinking_cone_scale / lepton.pt())
    }
}

/// Baseline collections after the full cascade.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct BaselineObjects {
    pub jets: ObjectCollection,
    pub electrons: ObjectCollection,
    pub muons: ObjectCollection,
}

/// Applies the fixed eight-step removal cascade to one event's collections.
///
/// Each step filters one collection against another and feeds its output to
/// the later steps; the cascade is a directed chain, not a symmetric
/// one-shot resolution, so the step order must not be rearranged.
#[derive(Clone, Debug)]
pub struct OverlapResolver {
    config: OverlapConfig,
}

impl OverlapResolver {
    pub fn new(config: OverlapConfig) -> Result<Self, TtrecError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &OverlapConfig {
        &self.config
    }

    pub fn resolve(
        &self,
        jets: &ObjectCollection,
        electrons: &ObjectCollection,
        muons: &ObjectCollection,
    ) -> BaselineObjects {
        let cfg = &self.config;

        // Electron-muon disambiguation: calorimeter-only muons are exempt.
        let muons = overlap_removal(
            muons,
            electrons,
            fixed_cone(cfg.lepton_lepton_cone),
            |muon, _| muon.has(ObjectFlags::CALO_TAGGED_ONLY),
        );
        let electrons = overlap_removal(
            electrons,
            &muons,
            fixed_cone(cfg.lepton_lepton_cone),
            no_exemption,
        );

        // Jet-electron: b-tagged jets win against electrons.
        let jets = overlap_removal(
            jets,
            &electrons,
            fixed_cone(cfg.jet_lepton_cone),
            |jet, _| jet.is_b_tagged(),
        );
        let electrons = overlap_removal(
            &electrons,
            &jets,
            fixed_cone(cfg.jet_lepton_cone),
            no_exemption,
        );

        // Jet-muon: only track-poor or muon-dominated light jets are removed.
        let muon_jet_cone = |jet: &PhysicsObject, muon: &PhysicsObject| {
            if !jet.is_b_tagged()
                && (jet.has(ObjectFlags::LESS_THAN_3_TRACKS)
                    || muon.pt() / jet.pt() > cfg.muon_jet_pt_ratio)
            {
                cfg.jet_lepton_cone
            } else {
                0.0
            }
        };
        let jets = overlap_removal(&jets, &muons, muon_jet_cone, |jet, _| jet.is_b_tagged());
        let muons = overlap_removal(&muons, &jets, fixed_cone(cfg.jet_lepton_cone), no_exemption);

        // Residual leptons inside the momentum-dependent jet cone.
        let muons = overlap_removal(
            &muons,
            &jets,
            |muon, _| cfg.shrinking_cone(muon),
            no_exemption,
        );
        let electrons = overlap_removal(
            &electrons,
            &jets,
            |electron, _| cfg.shrinking_cone(electron),
            no_exemption,
        );

        BaselineObjects {
            jets,
            electrons,
            muons,
        }
    }
}
