// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::assignment::{assignments, WSlots};
use ttrec_core::{FourVec, ObjectCollection, TtrecError};

/// World-average W boson mass (GeV) used as the chi-square reference.
pub const DEFAULT_W_MASS: f64 = 80.385;
/// World-average top quark mass (GeV) used as the chi-square reference.
pub const DEFAULT_TOP_MASS: f64 = 173.210;

const MIN_SIGNAL_JETS: usize = 4;
const MIN_B_JETS: usize = 2;
const MIN_LIGHT_JETS: usize = 2;

/// Reference masses for the chi-square objective.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Chi2PairConfig {
    pub w_mass: f64,
    pub top_mass: f64,
}

impl Default for Chi2PairConfig {
    fn default() -> Self {
        Self {
            w_mass: DEFAULT_W_MASS,
            top_mass: DEFAULT_TOP_MASS,
        }
    }
}

impl Chi2PairConfig {
    fn validate(&self) -> Result<(), TtrecError> {
        for (name, value) in [("w_mass", self.w_mass), ("top_mass", self.top_mass)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TtrecError::invalid_input(format!(
                    "Chi2PairConfig.{name} must be finite and > 0; got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// One reconstructed top candidate of the winning hypothesis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TopCandidate {
    /// Full kinematic sum of the W jets and the b-jet.
    pub p4: FourVec,
    /// Kinematic sum of the W jets alone.
    pub w_p4: FourVec,
    /// This candidate's chi-square term.
    pub chi2: f64,
    /// Light-jet indices feeding the W candidate.
    pub w_jets: WSlots,
    /// Index into the b-jet pool.
    pub b_jet: usize,
}

impl TopCandidate {
    /// Transverse projection with the energy re-derived on the top mass
    /// shell: the momentum keeps (px, py) and drops pz, while the energy is
    /// replaced by `sqrt(top_mass^2 + pt^2)` instead of the kinematic sum's
    /// own energy. Downstream stransverse-mass inputs rely on exactly this
    /// substitution.
    pub fn transverse_on_shell(&self, top_mass: f64) -> FourVec {
        let pt = self.p4.pt();
        FourVec::new(
            self.p4.px,
            self.p4.py,
            0.0,
            (top_mass * top_mass + pt * pt).sqrt(),
        )
    }
}

/// The minimum-score hypothesis, labeled so `top0` carries the smaller of
/// the two individual chi-square terms.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TopPair {
    pub top0: TopCandidate,
    pub top1: TopCandidate,
}

impl TopPair {
    /// Combined score of the hypothesis.
    pub fn chi2(&self) -> f64 {
        self.top0.chi2 + self.top1.chi2
    }

    /// Transverse on-shell projections of both candidates.
    pub fn transverse_tops(&self, top_mass: f64) -> (FourVec, FourVec) {
        (
            self.top0.transverse_on_shell(top_mass),
            self.top1.transverse_on_shell(top_mass),
        )
    }
}

/// Counters summarizing one search.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub candidates_scored: usize,
}

/// Search outcome: the best hypothesis, if the search space was non-empty,
/// plus counters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reconstruction {
    pub best: Option<TopPair>,
    pub stats: SearchStats,
}

/// Combinatorial top-pair reconstructor.
///
/// Scans every assignment produced by [`assignments`] and keeps the one with
/// the strictly smallest combined chi-square; on ties the earlier-found
/// hypothesis wins. Insufficient jet multiplicity is not an error: the
/// search is skipped and the result carries no hypothesis.
#[derive(Clone, Debug)]
pub struct Chi2TopPairFinder {
    config: Chi2PairConfig,
}

impl Chi2TopPairFinder {
    pub fn new(config: Chi2PairConfig) -> Result<Self, TtrecError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Chi2PairConfig {
        &self.config
    }

    fn chi2_term(&self, w_mass: f64, top_mass: f64) -> f64 {
        let dw = w_mass - self.config.w_mass;
        let dt = top_mass - self.config.top_mass;
        dw * dw / self.config.w_mass + dt * dt / self.config.top_mass
    }

    /// Runs the full search over one event's jet collections.
    ///
    /// `signal_jets` is only consulted for the multiplicity precondition;
    /// the assignment indices refer to `light_jets` and `b_jets`.
    pub fn reconstruct(
        &self,
        signal_jets: &ObjectCollection,
        b_jets: &ObjectCollection,
        light_jets: &ObjectCollection,
    ) -> Reconstruction {
        let mut stats = SearchStats::default();

        if signal_jets.len() < MIN_SIGNAL_JETS
            || b_jets.len() < MIN_B_JETS
            || light_jets.len() < MIN_LIGHT_JETS
        {
            return Reconstruction { best: None, stats };
        }

        let mut best: Option<TopPair> = None;
        let mut best_chi2 = f64::INFINITY;

        for assignment in assignments(light_jets.len(), b_jets.len()) {
            let w1 = slot_sum(light_jets, &assignment.w1);
            let w2 = slot_sum(light_jets, &assignment.w2);
            let top1 = w1 + b_jets[assignment.b1].p4;
            let top2 = w2 + b_jets[assignment.b2].p4;

            let chi21 = self.chi2_term(w1.mass(), top1.mass());
            let chi22 = self.chi2_term(w2.mass(), top2.mass());
            stats.candidates_scored += 1;

            let combined = chi21 + chi22;
            if combined < best_chi2 {
                best_chi2 = combined;
                let cand1 = TopCandidate {
                    p4: top1,
                    w_p4: w1,
                    chi2: chi21,
                    w_jets: assignment.w1,
                    b_jet: assignment.b1,
                };
                let cand2 = TopCandidate {
                    p4: top2,
                    w_p4: w2,
                    chi2: chi22,
                    w_jets: assignment.w2,
                    b_jet: assignment.b2,
                };
                best = Some(if chi21 < chi22 {
                    TopPair {
                        top0: cand1,
                        top1: cand2,
                    }
                } else {
                    TopPair {
                        top0: cand2,
                        top1: cand1,
                    }
                });
            }
        }

        Reconstruction { best, stats }
    }
}

fn slot_sum(light_jets: &ObjectCollection, slots: &WSlots) -> FourVec {
    let mut sum = light_jets[slots.seed].p4;
    if let Some(extra) = slots.extra {
        sum += light_jets[extra].p4;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::{
        Chi2PairConfig, Chi2TopPairFinder, Reconstruction, DEFAULT_TOP_MASS, DEFAULT_W_MASS,
    };
    use std::f64::consts::PI;
    use ttrec_core::{FourVec, ObjectCollection, ObjectFlags, ObjectKind, PhysicsObject};

    fn jet(pt: f64, eta: f64, phi: f64, m: f64) -> PhysicsObject {
        PhysicsObject::new(
            FourVec::from_pt_eta_phi_m(pt, eta, phi, m),
            ObjectKind::Jet,
            ObjectFlags::NONE,
        )
    }

    fn collection(jets: Vec<PhysicsObject>) -> ObjectCollection {
        ObjectCollection::from_vec(jets)
    }

    fn finder() -> Chi2TopPairFinder {
        Chi2TopPairFinder::new(Chi2PairConfig::default()).expect("default config should validate")
    }

    fn run(
        light: Vec<PhysicsObject>,
        b: Vec<PhysicsObject>,
    ) -> Reconstruction {
        let signal = collection(light.clone()).concat(&collection(b.clone()));
        finder().reconstruct(&signal, &collection(b), &collection(light))
    }

    /// b-jet pt that puts (W + b) exactly on the top mass when the W system
    /// is at rest: solves (e_w + x)^2 - x^2 = top^2 for a massless b.
    fn on_shell_b_pt() -> f64 {
        (DEFAULT_TOP_MASS * DEFAULT_TOP_MASS - DEFAULT_W_MASS * DEFAULT_W_MASS)
            / (2.0 * DEFAULT_W_MASS)
    }

    #[test]
    fn config_validation_rejects_bad_reference_masses() {
        let err = Chi2TopPairFinder::new(Chi2PairConfig {
            w_mass: 0.0,
            ..Chi2PairConfig::default()
        })
        .expect_err("zero W mass must fail");
        assert!(err.to_string().contains("w_mass"));

        let err = Chi2TopPairFinder::new(Chi2PairConfig {
            top_mass: f64::NAN,
            ..Chi2PairConfig::default()
        })
        .expect_err("NaN top mass must fail");
        assert!(err.to_string().contains("top_mass"));
    }

    #[test]
    fn three_signal_jets_skip_the_search_regardless_of_tags() {
        // 1 light + 2 b-jets: light and b preconditions interleave, but the
        // 4-signal-jet floor alone must veto the search.
        let light = vec![jet(60.0, 0.0, 0.0, 5.0), jet(55.0, 0.5, 1.0, 5.0)];
        let b = vec![jet(70.0, -0.5, 2.0, 5.0), jet(45.0, 1.0, -2.0, 5.0)];
        let signal = collection(vec![
            jet(60.0, 0.0, 0.0, 5.0),
            jet(55.0, 0.5, 1.0, 5.0),
            jet(70.0, -0.5, 2.0, 5.0),
        ]);
        let out = finder().reconstruct(&signal, &collection(b), &collection(light));
        assert!(out.best.is_none());
        assert_eq!(out.stats.candidates_scored, 0);
    }

    #[test]
    fn too_few_b_or_light_jets_skip_the_search() {
        let four_jets = vec![
            jet(60.0, 0.0, 0.0, 5.0),
            jet(55.0, 0.5, 1.0, 5.0),
            jet(50.0, -0.5, 2.0, 5.0),
            jet(45.0, 1.0, -2.0, 5.0),
        ];
        let signal = collection(four_jets.clone());

        let one_b = finder().reconstruct(
            &signal,
            &collection(vec![four_jets[0]]),
            &collection(four_jets[1..].to_vec()),
        );
        assert!(one_b.best.is_none());

        let one_light = finder().reconstruct(
            &signal,
            &collection(four_jets[..2].to_vec()),
            &collection(vec![four_jets[2]]),
        );
        assert!(one_light.best.is_none());
    }

    #[test]
    fn candidate_counts_follow_the_enumeration_space() {
        let b = vec![jet(70.0, -1.5, 2.0, 5.0), jet(45.0, 1.5, -2.0, 5.0)];

        let two_light = vec![jet(60.0, 0.0, 0.0, 5.0), jet(55.0, 0.5, 1.0, 5.0)];
        assert_eq!(run(two_light, b.clone()).stats.candidates_scored, 2);

        let three_light = vec![
            jet(60.0, 0.0, 0.0, 5.0),
            jet(55.0, 0.5, 1.0, 5.0),
            jet(50.0, -0.5, -1.0, 5.0),
        ];
        assert_eq!(run(three_light, b.clone()).stats.candidates_scored, 12);

        let four_light = vec![
            jet(60.0, 0.0, 0.0, 5.0),
            jet(55.0, 0.5, 1.0, 5.0),
            jet(50.0, -0.5, -1.0, 5.0),
            jet(40.0, 0.2, 2.5, 5.0),
        ];
        assert_eq!(run(four_light, b).stats.candidates_scored, 42);
    }

    #[test]
    fn perfect_merged_merged_event_is_found_with_all_four_light_jets() {
        // Two W candidates from back-to-back massless jet pairs (pair mass
        // exactly the W reference, vector sum at rest) plus on-shell b-jets:
        // the merged/merged variant scores an exact zero while every
        // single-jet W has zero mass and scores far off.
        let half_w = DEFAULT_W_MASS / 2.0;
        let b_pt = on_shell_b_pt();
        let light = vec![
            jet(half_w, 0.0, 0.0, 0.0),
            jet(half_w, 0.0, PI, 0.0),
            jet(half_w, 0.0, PI / 2.0, 0.0),
            jet(half_w, 0.0, -PI / 2.0, 0.0),
        ];
        let b = vec![jet(b_pt, 0.0, 1.0, 0.0), jet(b_pt, 0.0, -2.0, 0.0)];

        let out = run(light, b);
        let best = out.best.expect("search space is non-empty");
        assert!(best.chi2() < 1e-9, "chi2 = {}", best.chi2());

        let (w0, w1) = (best.top0.w_jets, best.top1.w_jets);
        assert!(w0.extra.is_some() && w1.extra.is_some());
        let mut used: Vec<usize> = [
            w0.seed,
            w0.extra.expect("merged"),
            w1.seed,
            w1.extra.expect("merged"),
        ]
        .to_vec();
        used.sort_unstable();
        assert_eq!(used, vec![0, 1, 2, 3]);
        assert!((best.top0.w_p4.mass() - DEFAULT_W_MASS).abs() < 1e-6);
        assert!((best.top0.p4.mass() - DEFAULT_TOP_MASS).abs() < 1e-6);
    }

    #[test]
    fn equal_score_tie_keeps_the_first_enumerated_hypothesis() {
        // Fully symmetric layout: swapping the two b-jets mirrors the event,
        // so both b orderings score identically (bitwise: the components are
        // exact axis-aligned values, and squaring drops the signs). Strict
        // less-than keeps the (b1 = 0, b2 = 1) hypothesis found first: the
        // candidate seeded by light jet 0 must carry b-jet 0.
        let axis_jet = |px: f64, py: f64, e: f64| {
            PhysicsObject::new(FourVec::new(px, py, 0.0, e), ObjectKind::Jet, ObjectFlags::NONE)
        };
        let light = vec![axis_jet(50.0, 0.0, 50.0), axis_jet(-50.0, 0.0, 50.0)];
        let b = vec![axis_jet(0.0, 60.0, 60.0), axis_jet(0.0, -60.0, 60.0)];
        let b_for_seed_zero = |out: &Reconstruction| {
            let best = out.best.expect("non-empty search");
            [best.top0, best.top1]
                .into_iter()
                .find(|cand| cand.w_jets.seed == 0)
                .expect("one candidate is seeded by light jet 0")
                .b_jet
        };

        let out = run(light, b);
        assert_eq!(out.stats.candidates_scored, 2);
        assert_eq!(b_for_seed_zero(&out), 0);
    }

    #[test]
    fn top0_carries_the_smaller_individual_term() {
        let light = vec![
            jet(95.0, 0.3, 0.1, 20.0),
            jet(41.0, -0.8, 2.2, 8.0),
            jet(66.0, 1.1, -1.3, 12.0),
            jet(33.0, -0.2, 2.9, 6.0),
        ];
        let b = vec![jet(88.0, 0.7, -2.6, 4.5), jet(52.0, -1.4, 0.8, 4.5)];
        let best = run(light, b).best.expect("non-empty search");
        assert!(best.top0.chi2 <= best.top1.chi2);
        assert!((best.chi2() - (best.top0.chi2 + best.top1.chi2)).abs() < 1e-12);
    }

    #[test]
    fn reconstruction_is_deterministic() {
        let light = vec![
            jet(95.0, 0.3, 0.1, 20.0),
            jet(41.0, -0.8, 2.2, 8.0),
            jet(66.0, 1.1, -1.3, 12.0),
        ];
        let b = vec![jet(88.0, 0.7, -2.6, 4.5), jet(52.0, -1.4, 0.8, 4.5)];
        let first = run(light.clone(), b.clone());
        let second = run(light, b);
        assert_eq!(first, second);
    }

    #[test]
    fn transverse_projection_substitutes_the_on_shell_energy() {
        let light = vec![
            jet(95.0, 0.3, 0.1, 20.0),
            jet(41.0, -0.8, 2.2, 8.0),
            jet(66.0, 1.1, -1.3, 12.0),
            jet(33.0, -0.2, 2.9, 6.0),
        ];
        let b = vec![jet(88.0, 0.7, -2.6, 4.5), jet(52.0, -1.4, 0.8, 4.5)];
        let best = run(light, b).best.expect("non-empty search");

        let (proj0, proj1) = best.transverse_tops(DEFAULT_TOP_MASS);
        for (proj, full) in [(proj0, best.top0.p4), (proj1, best.top1.p4)] {
            assert_eq!(proj.pz, 0.0);
            assert_eq!(proj.px, full.px);
            assert_eq!(proj.py, full.py);
            let expected = (DEFAULT_TOP_MASS * DEFAULT_TOP_MASS + full.pt() * full.pt()).sqrt();
            assert!((proj.e - expected).abs() < 1e-9);
            // The projected energy is deliberately not the kinematic sum's.
            assert!((proj.e - full.e).abs() > 1e-6);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn reconstruction_serde_roundtrip() {
        let light = vec![
            jet(95.0, 0.3, 0.1, 20.0),
            jet(41.0, -0.8, 2.2, 8.0),
            jet(66.0, 1.1, -1.3, 12.0),
        ];
        let b = vec![jet(88.0, 0.7, -2.6, 4.5), jet(52.0, -1.4, 0.8, 4.5)];
        let out = run(light, b);
        let encoded = serde_json::to_string(&out).expect("reconstruction should serialize");
        let decoded: Reconstruction =
            serde_json::from_str(&encoded).expect("reconstruction should deserialize");
        assert_eq!(decoded, out);
    }
}
