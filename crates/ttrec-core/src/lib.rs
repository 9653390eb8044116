// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod collection;
pub mod errors;
pub mod kinematics;
pub mod object;

pub use collection::ObjectCollection;
pub use errors::TtrecError;
pub use kinematics::{wrap_delta_phi, FourVec};
pub use object::{ObjectFlags, ObjectKind, PhysicsObject};

/// Shared data model for the ttrec workspace.
pub fn crate_name() -> &'static str {
    "ttrec-core"
}
