// SPDX-License-Identifier: MIT OR Apache-2.0

#![no_main]

#[path = "common.rs"]
mod common;

use libfuzzer_sys::fuzz_target;
use std::f64::consts::PI;
use ttrec_analysis::{
    AnalysisConfig, AnalysisEvent, EventClassifier, JetReclusterer, StransverseMass,
};
use ttrec_core::{FourVec, ObjectCollection, ObjectFlags, ObjectKind, PhysicsObject};

/// Clusters by simple pairwise merging: good enough to exercise the fat-jet
/// observables without a real clustering backend.
struct PairwiseReclusterer;

impl JetReclusterer for PairwiseReclusterer {
    fn recluster(&self, jets: &ObjectCollection, _radius: f64, pt_min: f64) -> ObjectCollection {
        let mut merged = Vec::new();
        let mut iter = jets.iter();
        while let Some(first) = iter.next() {
            let p4 = match iter.next() {
                Some(second) => first.p4 + second.p4,
                None => first.p4,
            };
            if p4.pt() > pt_min {
                merged.push(PhysicsObject::new(p4, ObjectKind::Jet, ObjectFlags::NONE));
            }
        }
        merged.into_iter().collect()
    }
}

struct PtScaledMt2;

impl StransverseMass for PtScaledMt2 {
    fn mt2(&self, a: &FourVec, b: &FourVec, met: &FourVec) -> f64 {
        (a.pt() + b.pt() + met.pt()) / 3.0
    }
}

fn decode_objects(
    cursor: &mut common::ByteCursor,
    count: usize,
    kind: ObjectKind,
) -> ObjectCollection {
    (0..count)
        .map(|_| {
            let pt = common::scalar(cursor.next_u8(), cursor.next_i16(), 0.0, 600.0);
            let eta = common::scalar(cursor.next_u8(), cursor.next_i16(), -5.0, 5.0);
            let phi = common::scalar(cursor.next_u8(), cursor.next_i16(), -PI, PI);
            let m = common::scalar(cursor.next_u8(), cursor.next_i16(), 0.0, 50.0);

            let flag_seed = cursor.next_u8();
            let mut flags = ObjectFlags::NONE;
            if flag_seed & 1 != 0 {
                flags |= ObjectFlags::B_TAGGED;
            }
            if flag_seed & 2 != 0 {
                flags |= ObjectFlags::LESS_THAN_3_TRACKS;
            }
            if flag_seed & 4 != 0 {
                flags |= ObjectFlags::AT_MOST_4_TRACKS;
            }
            if flag_seed & 8 != 0 {
                flags |= ObjectFlags::CALO_TAGGED_ONLY;
            }
            if flag_seed & 16 != 0 {
                flags |= ObjectFlags::JET_VERTEX_TAGGED;
            }
            if flag_seed & 32 != 0 {
                flags |= ObjectFlags::LOOSE_QUALITY;
            }

            PhysicsObject::new(FourVec::from_pt_eta_phi_m(pt, eta, phi, m), kind, flags)
        })
        .collect()
}

fuzz_target!(|data: &[u8]| {
    let mut cursor = common::ByteCursor::new(data);

    let Ok(classifier) = EventClassifier::new(AnalysisConfig::default()) else {
        return;
    };

    let n_jets = common::bounded(cursor.next_u8(), 0, 12);
    let n_electrons = common::bounded(cursor.next_u8(), 0, 3);
    let n_muons = common::bounded(cursor.next_u8(), 0, 3);

    let met_pt = common::scalar(cursor.next_u8(), cursor.next_i16(), 0.0, 1_000.0);
    let met_phi = common::scalar(cursor.next_u8(), cursor.next_i16(), -PI, PI);

    let event = AnalysisEvent {
        jets: decode_objects(&mut cursor, n_jets, ObjectKind::Jet),
        electrons: decode_objects(&mut cursor, n_electrons, ObjectKind::Electron),
        muons: decode_objects(&mut cursor, n_muons, ObjectKind::Muon),
        met: FourVec::new(met_pt * met_phi.cos(), met_pt * met_phi.sin(), 0.0, met_pt),
        met_sig: common::scalar(cursor.next_u8(), cursor.next_i16(), 0.0, 50.0),
    };

    let summary = classifier.classify(&event, &PairwiseReclusterer, &PtScaledMt2);

    // region names come from the fixed table
    for name in &summary.accepted {
        assert!(name.starts_with("SR"));
    }

    let again = classifier.classify(&event, &PairwiseReclusterer, &PtScaledMt2);
    assert_eq!(summary.accepted, again.accepted);
});
