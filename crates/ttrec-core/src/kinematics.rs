// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Four-momentum in Cartesian components (GeV).
///
/// Composite objects are built by addition; invariant mass is
/// `sqrt(max(0, e^2 - |p|^2))` so numerically slightly spacelike sums do not
/// produce NaN.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FourVec {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub e: f64,
}

impl FourVec {
    pub const fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Builds a four-vector from collider coordinates and invariant mass.
    pub fn from_pt_eta_phi_m(pt: f64, eta: f64, phi: f64, m: f64) -> Self {
        let px = pt * phi.cos();
        let py = pt * phi.sin();
        let pz = pt * eta.sinh();
        let p2 = px * px + py * py + pz * pz;
        let e = (m.max(0.0) * m.max(0.0) + p2).sqrt();
        Self { px, py, pz, e }
    }

    /// Builds a four-vector from collider coordinates and energy.
    pub fn from_pt_eta_phi_e(pt: f64, eta: f64, phi: f64, e: f64) -> Self {
        Self {
            px: pt * phi.cos(),
            py: pt * phi.sin(),
            pz: pt * eta.sinh(),
            e,
        }
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Magnitude of the three-momentum.
    pub fn p(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    /// Azimuthal angle in (-pi, pi].
    pub fn phi(&self) -> f64 {
        self.py.atan2(self.px)
    }

    /// Pseudorapidity, `asinh(pz / pt)`.
    ///
    /// A vector with zero transverse momentum maps to signed infinity
    /// (zero for the null vector), matching the usual collider convention.
    pub fn eta(&self) -> f64 {
        let pt = self.pt();
        if pt > 0.0 {
            (self.pz / pt).asinh()
        } else if self.pz == 0.0 {
            0.0
        } else {
            f64::INFINITY.copysign(self.pz)
        }
    }

    /// Invariant mass, clamped at zero.
    pub fn mass(&self) -> f64 {
        let m2 = self.e * self.e - self.p() * self.p();
        m2.max(0.0).sqrt()
    }

    /// Signed azimuthal separation wrapped into [-pi, pi).
    pub fn delta_phi(&self, other: &Self) -> f64 {
        wrap_delta_phi(self.phi() - other.phi())
    }

    /// Angular separation `sqrt(d_eta^2 + d_phi^2)`.
    pub fn delta_r(&self, other: &Self) -> f64 {
        let d_eta = self.eta() - other.eta();
        let d_phi = self.delta_phi(other);
        (d_eta * d_eta + d_phi * d_phi).sqrt()
    }

    /// Transverse mass of this object against a recoil vector,
    /// `sqrt(2 pt_a pt_b (1 - cos d_phi))`.
    pub fn transverse_mass(&self, recoil: &Self) -> f64 {
        let mt2 = 2.0 * self.pt() * recoil.pt() * (1.0 - self.delta_phi(recoil).cos());
        mt2.max(0.0).sqrt()
    }
}

/// Wraps an azimuthal difference into [-pi, pi).
pub fn wrap_delta_phi(d_phi: f64) -> f64 {
    use std::f64::consts::PI;
    (d_phi + PI).rem_euclid(2.0 * PI) - PI
}

impl Add for FourVec {
    type Output = FourVec;

    fn add(self, rhs: FourVec) -> FourVec {
        FourVec {
            px: self.px + rhs.px,
            py: self.py + rhs.py,
            pz: self.pz + rhs.pz,
            e: self.e + rhs.e,
        }
    }
}

impl AddAssign for FourVec {
    fn add_assign(&mut self, rhs: FourVec) {
        *self = *self + rhs;
    }
}

impl Sum for FourVec {
    fn sum<I: Iterator<Item = FourVec>>(iter: I) -> FourVec {
        iter.fold(FourVec::default(), Add::add)
    }
}
