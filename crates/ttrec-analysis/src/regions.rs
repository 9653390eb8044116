// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Signal-region predicates over the derived observables.
//!
//! Three families target fully-resolved tops (`SRA`), partially-resolved
//! tops (`SRB`) and a hard initial-state-radiation topology (`SRD`). The
//! `TT`/`TW`/`T0` suffixes bin the subleading large-radius jet mass into
//! top-like, W-like and light windows.

use crate::observables::Observables;

/// Preselection: hard missing momentum, no leptons, four jets, one b-tag.
pub fn pre_1b4j0l(o: &Observables) -> bool {
    o.met > 250.0
        && o.n_leptons == 0
        && o.n_signal_jets >= 4
        && o.n_b_jets >= 1
        && o.second_jet_pt > 80.0
        && o.fourth_jet_pt > 40.0
        && o.dphi_jet_met_min2 > 0.4
}

/// Tighter preselection: second b-tag, anti-QCD azimuthal cuts, tau veto.
pub fn pre_2b4j0l(o: &Observables) -> bool {
    pre_1b4j0l(o)
        && o.n_b_jets >= 2
        && o.dphi_jet_met_min4 > 0.4
        && o.met_sig > 5.0
        && o.mt_b_min > 50.0
        && o.mt_tau_cand < 0.0
}

pub fn pre_2b4j0l_tight(o: &Observables) -> bool {
    pre_2b4j0l(o) && o.mt_b_min > 200.0
}

/// Two large-radius jets with a top-like leading mass.
fn boosted_top_topology(o: &Observables) -> bool {
    o.n_fat_jets_r12 >= 2 && o.fat_r12_m0 > 120.0
}

fn subleading_mass_top_like(o: &Observables) -> bool {
    o.fat_r12_m1 > 120.0
}

fn subleading_mass_w_like(o: &Observables) -> bool {
    o.fat_r12_m1 > 60.0 && o.fat_r12_m1 < 120.0
}

fn subleading_mass_light(o: &Observables) -> bool {
    o.fat_r12_m1 > 0.0 && o.fat_r12_m1 < 60.0
}

fn sra_common(o: &Observables) -> bool {
    o.mt2_chi2 > 450.0 && o.fat_r8_m0 > 60.0 && o.met_sig > 25.0 && o.n_close_by_b_leading >= 1
}

pub fn sra(o: &Observables) -> bool {
    pre_2b4j0l_tight(o) && boosted_top_topology(o) && sra_common(o)
}

pub fn sra_tt(o: &Observables) -> bool {
    pre_2b4j0l_tight(o)
        && boosted_top_topology(o)
        && subleading_mass_top_like(o)
        && sra_common(o)
        && o.n_close_by_b_subleading >= 1
        && o.dr_bb > 1.0
}

pub fn sra_tw(o: &Observables) -> bool {
    pre_2b4j0l_tight(o) && boosted_top_topology(o) && subleading_mass_w_like(o) && sra_common(o)
}

pub fn sra_t0(o: &Observables) -> bool {
    pre_2b4j0l_tight(o) && boosted_top_topology(o) && subleading_mass_light(o) && sra_common(o)
}

pub fn srb(o: &Observables) -> bool {
    pre_2b4j0l_tight(o)
        && o.mt_b_max > 200.0
        && o.dr_bb > 1.4
        && boosted_top_topology(o)
        && o.mt2_chi2 < 450.0
        && o.met_sig > 14.0
}

pub fn srb_tt(o: &Observables) -> bool {
    srb(o) && subleading_mass_top_like(o)
}

pub fn srb_tw(o: &Observables) -> bool {
    srb(o) && subleading_mass_w_like(o)
}

pub fn srb_t0(o: &Observables) -> bool {
    srb(o) && subleading_mass_light(o)
}

/// Hard leading light jet recoiling against the missing momentum.
pub fn srd_loose(o: &Observables) -> bool {
    o.n_leptons == 0
        && o.n_bad_jets == 0
        && o.met > 250.0
        && o.n_light_jets > 0
        && o.lead_light_pt > 250.0
        && o.lead_light_dr_met > 2.4
        && o.ht_sig > 22.0
}

pub fn srd0(o: &Observables) -> bool {
    srd_loose(o) && o.n_b_jets == 0 && o.dphi_jet_met_min4 > 0.4 && o.ht_sig > 26.0
}

pub fn srd1(o: &Observables) -> bool {
    srd_loose(o) && o.n_b_jets == 1 && o.lead_b_abs_eta < 1.6 && o.dphi_lead_b_lead_light > 2.2
}

pub fn srd2(o: &Observables) -> bool {
    srd_loose(o)
        && o.n_b_jets >= 2
        && o.lead_b_pt < 175.0
        && o.sub_b_abs_eta < 1.2
        && o.dphi_lead_b_lead_light > 2.2
        && o.dphi_sub_b_lead_light > 1.6
}

pub fn srd(o: &Observables) -> bool {
    srd0(o) || srd1(o) || srd2(o)
}

/// Names of all regions accepting this event, in a fixed evaluation order.
/// Regions overlap; an event can land in several.
pub fn accepted_regions(o: &Observables) -> Vec<&'static str> {
    let regions: [(&'static str, fn(&Observables) -> bool); 12] = [
        ("SRA", sra),
        ("SRATT", sra_tt),
        ("SRATW", sra_tw),
        ("SRAT0", sra_t0),
        ("SRB", srb),
        ("SRBTT", srb_tt),
        ("SRBTW", srb_tw),
        ("SRBT0", srb_t0),
        ("SRD", srd),
        ("SRD0", srd0),
        ("SRD1", srd1),
        ("SRD2", srd2),
    ];
    regions
        .into_iter()
        .filter(|(_, predicate)| predicate(o))
        .map(|(name, _)| name)
        .collect()
}
