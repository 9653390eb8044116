// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Light-jet indices bound to one W candidate: a seed jet and an optional
/// second jet whose four-momentum is merged into the candidate.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WSlots {
    pub seed: usize,
    pub extra: Option<usize>,
}

impl WSlots {
    pub const fn single(seed: usize) -> Self {
        Self { seed, extra: None }
    }

    pub const fn merged(seed: usize, extra: usize) -> Self {
        Self {
            seed,
            extra: Some(extra),
        }
    }

    pub fn uses(&self, index: usize) -> bool {
        self.seed == index || self.extra == Some(index)
    }
}

/// One jet-to-role hypothesis: two W candidates from the light-jet pool and
/// two b-jets, all bound to distinct indices within their pools.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub w1: WSlots,
    pub w2: WSlots,
    pub b1: usize,
    pub b2: usize,
}

/// Enumerates every candidate assignment for `n_light` light jets and `n_b`
/// b-jets, in the fixed search order the running minimum depends on.
///
/// For each ordered seed pair (w1, w2) and ordered b pair, three topology
/// variants are emitted in sequence:
///
/// 1. both W candidates single-jet, only for `w2 > w1`, so each unordered
///    seed pair is tried once;
/// 2. W1 merged with an extra jet above its seed index, W2 single-jet;
///    needs at least 3 light jets;
/// 3. both merged; needs at least 4 light jets, and `w2 > w1` again.
///
/// The `w2 > w1` guard on variant 3 leaves variant 2 asymmetric on purpose:
/// the duplicate suppression is part of the search order being reproduced,
/// not a property to normalize away.
pub fn assignments(n_light: usize, n_b: usize) -> impl Iterator<Item = Assignment> {
    (0..n_light).flat_map(move |w1| {
        (0..n_light)
            .filter(move |&w2| w2 != w1)
            .flat_map(move |w2| {
                (0..n_b).flat_map(move |b1| {
                    (0..n_b)
                        .filter(move |&b2| b2 != b1)
                        .flat_map(move |b2| seed_variants(w1, w2, b1, b2, n_light))
                })
            })
    })
}

fn seed_variants(
    w1: usize,
    w2: usize,
    b1: usize,
    b2: usize,
    n_light: usize,
) -> impl Iterator<Item = Assignment> {
    let single_single = (w2 > w1).then_some(Assignment {
        w1: WSlots::single(w1),
        w2: WSlots::single(w2),
        b1,
        b2,
    });

    let merged = (n_light >= 3)
        .then(move || {
            (w1 + 1..n_light)
                .filter(move |&e1| e1 != w2)
                .flat_map(move |e1| {
                    let merged_single = std::iter::once(Assignment {
                        w1: WSlots::merged(w1, e1),
                        w2: WSlots::single(w2),
                        b1,
                        b2,
                    });
                    let merged_merged = (n_light >= 4 && w2 > w1)
                        .then(move || {
                            (w2 + 1..n_light)
                                .filter(move |&e2| e2 != w1 && e2 != e1)
                                .map(move |e2| Assignment {
                                    w1: WSlots::merged(w1, e1),
                                    w2: WSlots::merged(w2, e2),
                                    b1,
                                    b2,
                                })
                        })
                        .into_iter()
                        .flatten();
                    merged_single.chain(merged_merged)
                })
        })
        .into_iter()
        .flatten();

    single_single.into_iter().chain(merged)
}
