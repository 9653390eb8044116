// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::kinematics::FourVec;
use std::ops::{BitOr, BitOrAssign};

/// Reconstructed object category.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Electron,
    Muon,
    Jet,
}

/// Bitmask of identification and quality tags carried by a reconstructed
/// object. Flags are assigned upstream and read-only within the core.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObjectFlags(u32);

impl ObjectFlags {
    pub const NONE: ObjectFlags = ObjectFlags(0);
    /// Jet passes the 77% b-tagging working point.
    pub const B_TAGGED: ObjectFlags = ObjectFlags(1 << 0);
    /// Jet has fewer than three associated tracks.
    pub const LESS_THAN_3_TRACKS: ObjectFlags = ObjectFlags(1 << 1);
    /// Jet has at most four associated tracks (tau-candidate bookkeeping).
    pub const AT_MOST_4_TRACKS: ObjectFlags = ObjectFlags(1 << 2);
    /// Muon reconstructed from calorimeter information only.
    pub const CALO_TAGGED_ONLY: ObjectFlags = ObjectFlags(1 << 3);
    /// Jet passes the jet-vertex-tagger selection.
    pub const JET_VERTEX_TAGGED: ObjectFlags = ObjectFlags(1 << 4);
    /// Jet passes the loose jet-quality criteria.
    pub const LOOSE_QUALITY: ObjectFlags = ObjectFlags(1 << 5);

    pub const fn contains(self, other: ObjectFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ObjectFlags {
    type Output = ObjectFlags;

    fn bitor(self, rhs: ObjectFlags) -> ObjectFlags {
        ObjectFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for ObjectFlags {
    fn bitor_assign(&mut self, rhs: ObjectFlags) {
        self.0 |= rhs.0;
    }
}

/// Immutable reconstructed object: four-momentum plus categorical tags.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsObject {
    pub p4: FourVec,
    pub kind: ObjectKind,
    pub flags: ObjectFlags,
}

impl PhysicsObject {
    pub const fn new(p4: FourVec, kind: ObjectKind, flags: ObjectFlags) -> Self {
        Self { p4, kind, flags }
    }

    pub fn pt(&self) -> f64 {
        self.p4.pt()
    }

    pub fn eta(&self) -> f64 {
        self.p4.eta()
    }

    pub fn phi(&self) -> f64 {
        self.p4.phi()
    }

    pub fn mass(&self) -> f64 {
        self.p4.mass()
    }

    pub fn delta_r(&self, other: &PhysicsObject) -> f64 {
        self.p4.delta_r(&other.p4)
    }

    pub fn delta_phi(&self, other: &PhysicsObject) -> f64 {
        self.p4.delta_phi(&other.p4)
    }

    pub fn has(&self, flags: ObjectFlags) -> bool {
        self.flags.contains(flags)
    }

    pub fn is_b_tagged(&self) -> bool {
        self.has(ObjectFlags::B_TAGGED)
    }
}
