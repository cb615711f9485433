//! The truncated reciprocal-space sum.
//!
//! The sum runs over every nonzero integer triple `(l, m, n)` of the cutoff grid and
//! accumulates `exp(-|k|^2 / (4 alpha^2)) / |k|^2 * |S(k)|^2`. The `k = 0` term is
//! skipped: it diverges and corresponds to the neutralising background.
//!
//! Work is split over the planes of constant `l`. Each plane is summed into a local
//! scalar by one worker, and the plane totals are reduced in index order so that the
//! result does not depend on thread scheduling.

use super::structure::structure_factor;
use crate::lattice::{CutoffGrid, ReciprocalLattice};
use crate::math::vector;
use crate::params::SummationRange;
use crate::types::ChargeSet;
use rayon::prelude::*;

/// The components of a reciprocal-space energy evaluation, in energy units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KSpaceEnergy {
    /// The scaled reciprocal-space sum `f 2 pi / V * sum_k ...`, before the self-energy
    /// is removed. Always non-negative.
    pub reciprocal: f64,
    /// The self-energy `f alpha / sqrt(pi) sum_i q_i^2`.
    pub self_energy: f64,
    /// The vacuum surface term `f 2 pi / (3 V) |M|^2`, not included in [`KSpaceEnergy::net`].
    pub dipolar: f64,
}

impl KSpaceEnergy {
    /// Reciprocal-space energy with the self-energy subtracted (tin-foil boundary).
    pub fn net(&self) -> f64 {
        self.reciprocal - self.self_energy
    }

    /// Reciprocal-space energy for a cell surrounded by vacuum.
    pub fn net_with_dipolar(&self) -> f64 {
        self.net() + self.dipolar
    }
}

/// Raw sum `sum_{k != 0} exp(-k^2 / (4 alpha^2)) / k^2 |S(k)|^2` over the cutoff grid.
///
/// The caller applies the `f 2 pi / V` prefactor.
pub(crate) fn reciprocal_sum<S: ChargeSet + ?Sized>(
    reciprocal: &ReciprocalLattice,
    grid: &CutoffGrid,
    range: SummationRange,
    alpha: f64,
    charges: &S,
) -> f64 {
    let damping = -0.25 / (alpha * alpha);

    let planes: Vec<f64> = CutoffGrid::axis(grid.lmax, range)
        .into_par_iter()
        .map(|l| {
            let mut plane = 0.0;
            for m in CutoffGrid::axis(grid.mmax, range) {
                for n in CutoffGrid::axis(grid.nmax, range) {
                    if l == 0 && m == 0 && n == 0 {
                        continue;
                    }
                    let k = reciprocal.k_vector(l, m, n);
                    let k2 = vector::norm_squared(k);
                    let s = structure_factor(k, charges);
                    plane += (damping * k2).exp() / k2 * s.norm_sqr();
                }
            }
            plane
        })
        .collect();

    planes.iter().sum()
}
