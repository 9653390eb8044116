// SPDX-License-Identifier: MIT OR Apache-2.0

#![no_main]

#[path = "common.rs"]
mod common;

use libfuzzer_sys::fuzz_target;
use std::f64::consts::PI;
use ttrec_chi2::{Chi2PairConfig, Chi2TopPairFinder};
use ttrec_core::{FourVec, ObjectCollection, ObjectFlags, ObjectKind, PhysicsObject};

fn decode_jets(cursor: &mut common::ByteCursor, count: usize) -> ObjectCollection {
    (0..count)
        .map(|_| {
            let pt = common::scalar(cursor.next_u8(), cursor.next_i16(), 0.0, 500.0);
            let eta = common::scalar(cursor.next_u8(), cursor.next_i16(), -3.0, 3.0);
            let phi = common::scalar(cursor.next_u8(), cursor.next_i16(), -PI, PI);
            let m = common::scalar(cursor.next_u8(), cursor.next_i16(), 0.0, 80.0);
            PhysicsObject::new(
                FourVec::from_pt_eta_phi_m(pt, eta, phi, m),
                ObjectKind::Jet,
                ObjectFlags::NONE,
            )
        })
        .collect()
}

fuzz_target!(|data: &[u8]| {
    let mut cursor = common::ByteCursor::new(data);

    let w_mass = common::scalar(cursor.next_u8(), cursor.next_i16(), 1.0, 200.0);
    let top_mass = common::scalar(cursor.next_u8(), cursor.next_i16(), 1.0, 400.0);
    let Ok(finder) = Chi2TopPairFinder::new(Chi2PairConfig { w_mass, top_mass }) else {
        return;
    };

    let n_light = common::bounded(cursor.next_u8(), 0, 7);
    let n_b = common::bounded(cursor.next_u8(), 0, 4);
    let light = decode_jets(&mut cursor, n_light);
    let b = decode_jets(&mut cursor, n_b);
    let signal = light.concat(&b);

    let out = finder.reconstruct(&signal, &b, &light);

    if let Some(best) = &out.best {
        // labeling invariant holds whenever the terms are comparable
        if best.top0.chi2.is_finite() && best.top1.chi2.is_finite() {
            assert!(best.top0.chi2 <= best.top1.chi2);
        }
    }

    // same inputs, same outcome
    let again = finder.reconstruct(&signal, &b, &light);
    assert_eq!(out.stats, again.stats);
});
