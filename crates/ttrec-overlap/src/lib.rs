// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod cascade;
pub mod removal;

pub use cascade::{BaselineObjects, OverlapConfig, OverlapResolver};
pub use removal::{fixed_cone, no_exemption, overlap_removal};

/// Overlap-removal cascade for the ttrec workspace.
pub fn crate_name() -> &'static str {
    let _ = ttrec_core::crate_name();
    "ttrec-overlap"
}
