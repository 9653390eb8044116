// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use ttrec_core::{ObjectCollection, PhysicsObject};

/// Removes from `candidates` every object lying inside the cone of some
/// reference object, unless the exemption predicate keeps it.
///
/// A candidate `a` survives when for every reference object `b` either
/// `delta_r(a, b) >= cone(a, b)` or `exempt(a, b)` holds. The cone may be a
/// per-pair computed radius; returning zero means the pair never overlaps.
/// The input collections are not modified; the survivors are returned as a
/// new collection in their original order.
pub fn overlap_removal<R, X>(
    candidates: &ObjectCollection,
    reference: &ObjectCollection,
    cone: R,
    exempt: X,
) -> ObjectCollection
where
    R: Fn(&PhysicsObject, &PhysicsObject) -> f64,
    X: Fn(&PhysicsObject, &PhysicsObject) -> bool,
{
    candidates.filtered(|cand| {
        reference
            .iter()
            .all(|other| cand.delta_r(other) >= cone(cand, other) || exempt(cand, other))
    })
}

/// A constant cone radius, independent of the pair.
pub fn fixed_cone(radius: f64) -> impl Fn(&PhysicsObject, &PhysicsObject) -> f64 {
    move |_, _| radius
}

/// Exemption predicate that never exempts anything.
pub fn no_exemption(_: &PhysicsObject, _: &PhysicsObject) -> bool {
    false
}
