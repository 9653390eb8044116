// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod assignment;
pub mod reconstruct;

pub use assignment::{assignments, Assignment, WSlots};
pub use reconstruct::{
    Chi2PairConfig, Chi2TopPairFinder, Reconstruction, SearchStats, TopCandidate, TopPair,
    DEFAULT_TOP_MASS, DEFAULT_W_MASS,
};

/// Combinatorial top-pair reconstruction for the ttrec workspace.
pub fn crate_name() -> &'static str {
    let _ = ttrec_core::crate_name();
    "ttrec-chi2"
}
