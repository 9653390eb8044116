// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ttrec_chi2::{Chi2PairConfig, Chi2TopPairFinder};
use ttrec_core::{FourVec, ObjectCollection, ObjectFlags, ObjectKind, PhysicsObject};

fn lcg_next(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state
}

fn uniform(state: &mut u64, lo: f64, hi: f64) -> f64 {
    let unit = (lcg_next(state) >> 11) as f64 / (1u64 << 53) as f64;
    lo + unit * (hi - lo)
}

fn synthetic_jets(count: usize, state: &mut u64) -> ObjectCollection {
    (0..count)
        .map(|_| {
            let pt = uniform(state, 25.0, 180.0);
            let eta = uniform(state, -2.5, 2.5);
            let phi = uniform(state, -3.1, 3.1);
            let m = uniform(state, 0.0, 25.0);
            PhysicsObject::new(
                FourVec::from_pt_eta_phi_m(pt, eta, phi, m),
                ObjectKind::Jet,
                ObjectFlags::NONE,
            )
        })
        .collect()
}

fn benchmark_reconstruct(c: &mut Criterion) {
    let finder =
        Chi2TopPairFinder::new(Chi2PairConfig::default()).expect("default config should validate");

    let mut group = c.benchmark_group("chi2_top_pair");

    for (n_light, n_b) in [(4usize, 2usize), (6, 2), (8, 3)] {
        let mut state = 0xfeed_f00d_dead_beef_u64;
        let light = synthetic_jets(n_light, &mut state);
        let b = synthetic_jets(n_b, &mut state);
        let signal = light.concat(&b);

        group.bench_function(format!("reconstruct_l{n_light}_b{n_b}"), |bench| {
            bench.iter(|| {
                finder.reconstruct(black_box(&signal), black_box(&b), black_box(&light))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_reconstruct);
criterion_main!(benches);
