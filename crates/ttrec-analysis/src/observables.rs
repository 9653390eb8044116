// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::f64::consts::PI;
use ttrec_core::{FourVec, ObjectCollection};

/// Window used when counting reclustered jets; matches the signal-jet window.
pub const FAT_JET_PT_MIN: f64 = 20.0;
pub const FAT_JET_ETA_MAX: f64 = 2.8;

/// A b-jet within this distance of a reclustered jet counts as close-by.
pub const CLOSE_BY_RADIUS: f64 = 1.2;

/// Azimuthal window around the missing momentum for tau candidates.
pub const TAU_DPHI_MAX: f64 = PI / 5.0;

/// Per-event scalar observables consumed by the region predicates.
///
/// Quantities whose preconditions fail (too few jets, no fat jets) are left
/// at their zero defaults rather than being errors, so every event yields a
/// complete record. `mt_tau_cand` uses -1 as its "no candidate" value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Observables {
    pub met: f64,
    pub met_sig: f64,
    pub n_leptons: usize,
    pub n_signal_jets: usize,
    pub n_light_jets: usize,
    pub n_b_jets: usize,
    pub n_bad_jets: usize,
    /// Transverse momentum of the second-leading signal jet.
    pub second_jet_pt: f64,
    /// Transverse momentum of the fourth-leading signal jet.
    pub fourth_jet_pt: f64,
    /// Separation of the two leading b-jets.
    pub dr_bb: f64,
    pub dphi_jet_met_min2: f64,
    pub dphi_jet_met_min3: f64,
    pub dphi_jet_met_min4: f64,
    /// Transverse mass of the b-jet closest to the missing momentum in phi.
    pub mt_b_min: f64,
    /// Transverse mass of the b-jet farthest from the missing momentum in phi.
    pub mt_b_max: f64,
    pub n_close_by_b_leading: usize,
    pub n_close_by_b_subleading: usize,
    pub n_fat_jets_r8: usize,
    pub n_fat_jets_r12: usize,
    pub fat_r8_m0: f64,
    pub fat_r12_m0: f64,
    pub fat_r12_m1: f64,
    pub mt_tau_cand: f64,
    /// Scalar pt sum of the signal jets.
    pub ht: f64,
    /// met / sqrt(ht).
    pub ht_sig: f64,
    pub mt2_chi2: f64,
    pub lead_light_pt: f64,
    pub lead_light_dr_met: f64,
    pub lead_b_pt: f64,
    pub lead_b_abs_eta: f64,
    pub sub_b_abs_eta: f64,
    /// Signed azimuthal angle from the leading b-jet to the leading light jet.
    pub dphi_lead_b_lead_light: f64,
    pub dphi_sub_b_lead_light: f64,
}

/// Separation of the two leading b-jets, 0 with fewer than two.
pub fn delta_r_bb(b_jets: &ObjectCollection) -> f64 {
    if b_jets.len() > 1 {
        b_jets[1].delta_r(&b_jets[0])
    } else {
        0.0
    }
}

/// Smallest |delta phi| between the missing momentum and the `take` leading
/// jets. Events with fewer than `take` jets yield 0 so the cut downstream
/// fails rather than passing vacuously.
pub fn min_abs_dphi_to_met(jets: &ObjectCollection, met: &FourVec, take: usize) -> f64 {
    if jets.len() < take {
        return 0.0;
    }
    jets.iter()
        .take(take)
        .map(|jet| met.delta_phi(&jet.p4).abs())
        .fold(f64::MAX, f64::min)
}

/// Transverse masses of the b-jets azimuthally closest to and farthest from
/// the missing momentum. Requires at least two b-jets, otherwise (0, 0).
pub fn mt_b_extremes(b_jets: &ObjectCollection, met: &FourVec) -> (f64, f64) {
    if b_jets.len() < 2 {
        return (0.0, 0.0);
    }
    let mut dphi_min = f64::MAX;
    let mut dphi_max = 0.0;
    let mut mt_min = 0.0;
    let mut mt_max = 0.0;
    for jet in b_jets {
        let dphi = met.delta_phi(&jet.p4).abs();
        if dphi < dphi_min {
            dphi_min = dphi;
            mt_min = jet.p4.transverse_mass(met);
        }
        if dphi > dphi_max {
            dphi_max = dphi;
            mt_max = jet.p4.transverse_mass(met);
        }
    }
    (mt_min, mt_max)
}

/// Number of b-jets within [`CLOSE_BY_RADIUS`] of the leading and of the
/// subleading reclustered jet. Requires at least two b-jets, otherwise (0, 0).
pub fn close_by_b_counts(
    b_jets: &ObjectCollection,
    fat_jets: &ObjectCollection,
    n_fat: usize,
) -> (usize, usize) {
    if b_jets.len() < 2 {
        return (0, 0);
    }
    let mut leading = 0;
    let mut subleading = 0;
    for jet in b_jets {
        if n_fat > 0 && jet.delta_r(&fat_jets[0]) <= CLOSE_BY_RADIUS {
            leading += 1;
        }
        if n_fat > 1 && jet.delta_r(&fat_jets[1]) <= CLOSE_BY_RADIUS {
            subleading += 1;
        }
    }
    (leading, subleading)
}

/// Transverse mass of the first tau candidate aligned with the missing
/// momentum, -1 when none qualifies. The azimuthal comparison is signed, so
/// candidates trailing the missing momentum in phi always qualify.
pub fn tau_candidate_mt(tau_candidates: &ObjectCollection, met: &FourVec) -> f64 {
    let mut mt = -1.0;
    for jet in tau_candidates {
        if jet.p4.delta_phi(met) < TAU_DPHI_MAX {
            mt = jet.p4.transverse_mass(met);
        }
        if mt > 0.0 {
            break;
        }
    }
    mt
}

/// met / sqrt(ht). Degenerate with no jets; only consumed behind cuts that
/// require a hard leading jet.
pub fn ht_significance(met: f64, ht: f64) -> f64 {
    met / ht.sqrt()
}

fn count_in_window(jets: &ObjectCollection) -> usize {
    jets.count(|jet| jet.pt() > FAT_JET_PT_MIN && jet.eta().abs() < FAT_JET_ETA_MAX)
}

/// Assembles the full observable record from the selected collections.
#[allow(clippy::too_many_arguments)]
pub fn derive_observables(
    signal_jets: &ObjectCollection,
    light_jets: &ObjectCollection,
    b_jets: &ObjectCollection,
    tau_candidates: &ObjectCollection,
    fat_jets_r8: &ObjectCollection,
    fat_jets_r12: &ObjectCollection,
    n_leptons: usize,
    n_bad_jets: usize,
    met: &FourVec,
    met_sig: f64,
    mt2_chi2: f64,
) -> Observables {
    let n_fat_jets_r8 = count_in_window(fat_jets_r8);
    let n_fat_jets_r12 = count_in_window(fat_jets_r12);

    let (mt_b_min, mt_b_max) = mt_b_extremes(b_jets, met);
    let (n_close_by_b_leading, n_close_by_b_subleading) =
        close_by_b_counts(b_jets, fat_jets_r12, n_fat_jets_r12);

    let ht = signal_jets.sum_pt();
    let met_pt = met.pt();

    let lead_light = light_jets.get(0);
    let lead_b = b_jets.get(0);
    let sub_b = b_jets.get(1);

    Observables {
        met: met_pt,
        met_sig,
        n_leptons,
        n_signal_jets: signal_jets.len(),
        n_light_jets: light_jets.len(),
        n_b_jets: b_jets.len(),
        n_bad_jets,
        second_jet_pt: signal_jets.get(1).map_or(0.0, |jet| jet.pt()),
        fourth_jet_pt: signal_jets.get(3).map_or(0.0, |jet| jet.pt()),
        dr_bb: delta_r_bb(b_jets),
        dphi_jet_met_min2: min_abs_dphi_to_met(signal_jets, met, 2),
        dphi_jet_met_min3: min_abs_dphi_to_met(signal_jets, met, 3),
        dphi_jet_met_min4: min_abs_dphi_to_met(signal_jets, met, 4),
        mt_b_min,
        mt_b_max,
        n_close_by_b_leading,
        n_close_by_b_subleading,
        n_fat_jets_r8,
        n_fat_jets_r12,
        fat_r8_m0: fat_jets_r8.get(0).map_or(0.0, |jet| jet.mass()),
        fat_r12_m0: fat_jets_r12.get(0).map_or(0.0, |jet| jet.mass()),
        fat_r12_m1: fat_jets_r12.get(1).map_or(0.0, |jet| jet.mass()),
        mt_tau_cand: tau_candidate_mt(tau_candidates, met),
        ht,
        ht_sig: ht_significance(met_pt, ht),
        mt2_chi2,
        lead_light_pt: lead_light.map_or(0.0, |jet| jet.pt()),
        lead_light_dr_met: lead_light.map_or(0.0, |jet| jet.p4.delta_r(met)),
        lead_b_pt: lead_b.map_or(0.0, |jet| jet.pt()),
        lead_b_abs_eta: lead_b.map_or(0.0, |jet| jet.eta().abs()),
        sub_b_abs_eta: sub_b.map_or(0.0, |jet| jet.eta().abs()),
        dphi_lead_b_lead_light: match (lead_b, lead_light) {
            (Some(b), Some(light)) => b.delta_phi(light),
            _ => 0.0,
        },
        dphi_sub_b_lead_light: match (sub_b, lead_light) {
            (Some(b), Some(light)) => b.delta_phi(light),
            _ => 0.0,
        },
    }
}
